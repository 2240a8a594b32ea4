use crate::view::{badge_class, dollars, join_or_undecided, short_title};
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use ideascout_core::AnalyzedPost;
use scoring_engine::{RankingSummary, TierThresholds};
use std::fmt::Write;

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            padding: 20px;
            line-height: 1.6;
        }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 20px; overflow: hidden; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px; text-align: center; }
        .content { padding: 40px; }
        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 40px; }
        .stat-card { background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%); color: white; padding: 20px; border-radius: 15px; text-align: center; }
        .stat-card h3 { font-size: 2em; }
        .table-container { overflow-x: auto; margin-bottom: 40px; }
        table { width: 100%; border-collapse: collapse; }
        th { background: #667eea; color: white; padding: 12px; text-align: left; }
        td { padding: 12px; border-bottom: 1px solid #eee; }
        .score { font-weight: bold; color: #667eea; }
        .badge { display: inline-block; padding: 4px 10px; border-radius: 20px; font-size: 0.85em; }
        .badge-hot { background: #ff6b6b; color: white; }
        .badge-good { background: #51cf66; color: white; }
        .badge-ok { background: #ffd43b; color: #333; }
        .badge-low { background: #adb5bd; color: white; }
        .idea-card { border: 1px solid #eee; border-radius: 15px; padding: 20px; margin-bottom: 20px; }
        .meta span { margin-right: 16px; }
        .description { margin: 12px 0; color: #555; }
        .footer { padding: 20px 40px; color: #666; font-size: 0.9em; }
"#;

/// Daily HTML page on the 0–100 scale. `posts` must already be ranked.
pub fn render_html(posts: &[AnalyzedPost], date: NaiveDate, top_n: usize) -> String {
    let summary = RankingSummary::from_posts(posts);
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>🚀 Reddit 创意广场 - {date}</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🚀 Reddit 创意广场</h1>
            <p>每日精选 {count} 个创意 · {date}</p>
        </div>
        <div class="content">
            <div class="stats">
                <div class="stat-card"><h3>{count}</h3><p>📊 收集创意</p></div>
                <div class="stat-card"><h3>{recommended}</h3><p>✅ 推荐项目</p></div>
                <div class="stat-card"><h3>{average:.0}</h3><p>📈 平均分数</p></div>
            </div>
"#,
        date = date,
        style = STYLE,
        count = summary.count,
        recommended = summary.recommended,
        average = summary.average_score,
    );

    out.push_str(
        r#"            <h2>📊 创意排行榜</h2>
            <div class="table-container">
                <table>
                    <thead>
                        <tr><th>排名</th><th>创意标题</th><th>总分</th><th>推荐度</th><th>目标用户</th><th>技术难度</th><th>竞争</th><th>市场规模</th></tr>
                    </thead>
                    <tbody>
"#,
    );
    for (index, item) in posts.iter().enumerate() {
        let a = &item.analysis;
        let _ = writeln!(
            out,
            r#"                        <tr><td><strong>{}</strong></td><td><a href="{}" target="_blank">{}</a></td><td><span class="score">{}</span></td><td><span class="badge {}">{}</span></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            index + 1,
            attr(&item.post.url),
            text(&short_title(&item.post.display_title())),
            a.total_score,
            badge_class(a.recommendation_tier),
            a.recommendation_tier.label(),
            text(&a.target_users.join(", ")),
            a.tech.difficulty_score,
            a.competition.score,
            a.market.size.label(),
        );
    }
    out.push_str("                    </tbody>\n                </table>\n            </div>\n");

    let top = top_n.min(posts.len());
    let _ = writeln!(out, "            <h2>📝 Top {} 详细分析</h2>", top);
    for (index, item) in posts.iter().take(top).enumerate() {
        let a = &item.analysis;
        let _ = write!(
            out,
            r#"            <div class="idea-card">
                <h3>{rank}. {title}</h3>
                <div class="meta">
                    <span><strong>总分:</strong> {total}/100</span>
                    <span><strong>推荐度:</strong> {tier}</span>
                    <span><strong>来源:</strong> r/{subreddit}</span>
                </div>
                <ul>
                    <li>🎯 目标用户: {users}</li>
                    <li>💰 商业模式: {model} (利润潜力 {profitability}/10)</li>
                    <li>🔧 技术实现: {level} ({stack})</li>
                    <li>📱 MVP功能: {mvp}</li>
                    <li>🚀 部署方案: {deployment} · {duration}</li>
                    <li>💵 MVP成本: ${mvp_cost} · 月度运营: ${monthly_cost}</li>
                </ul>
"#,
            rank = index + 1,
            title = text(&item.post.display_title()),
            total = a.total_score,
            tier = a.recommendation_tier.label(),
            subreddit = text(&item.post.subreddit),
            users = text(&join_or_undecided(&a.target_users, " · ")),
            model = text(&a.business_model.summary()),
            profitability = a.business_model.profitability,
            level = a.tech.difficulty_level.label(),
            stack = text(&join_or_undecided(&a.tech.stack, ", ")),
            mvp = text(&join_or_undecided(&a.mvp.suggested_features, ", ")),
            deployment = text(&join_or_undecided(&a.deployment.plan, ", ")),
            duration = text(&a.deployment.estimated_duration),
            mvp_cost = dollars(a.cost.mvp_cost),
            monthly_cost = dollars(a.cost.monthly_cost),
        );
        if let Some(summary) = a.model_notes.as_ref().and_then(|n| n.summary.as_ref()) {
            let _ = writeln!(out, r#"                <div class="description">{}</div>"#, text(summary));
        } else if !item.post.snippet.trim().is_empty() {
            let _ = writeln!(
                out,
                r#"                <div class="description">{}</div>"#,
                text(item.post.snippet.trim())
            );
        }
        let _ = writeln!(
            out,
            r#"                <a href="{}" target="_blank">查看原帖 →</a>
            </div>"#,
            attr(&item.post.url)
        );
    }

    let _ = write!(
        out,
        r#"        </div>
        <div class="footer">
            <p>📌 评分说明：总分 0-100 分 | {legend}</p>
            <p>数据来源：Reddit 多个创意相关 subreddit</p>
        </div>
    </div>
</body>
</html>
"#,
        legend = text(&TierThresholds::COMPOSITE.legend()),
    );
    out
}

/// Landing page linking the day's report.
pub fn render_index(date: NaiveDate, count: usize, page: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <title>创意广场</title>
</head>
<body>
    <h1>创意广场</h1>
    <p>{date} 创意: {count} 个</p>
    <a href="{page}">查看今日创意</a>
</body>
</html>
"#,
        date = date,
        count = count,
        page = attr(page),
    )
}
