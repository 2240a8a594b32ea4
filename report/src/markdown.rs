use crate::view::{dollars, join_or_undecided, short_title, LegacyEntry};
use chrono::NaiveDate;
use ideascout_core::AnalyzedPost;
use scoring_engine::TierThresholds;
use std::fmt::Write;

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Daily report on the 0–100 scale. `posts` must already be ranked.
pub fn render_markdown(posts: &[AnalyzedPost], date: NaiveDate, top_n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🚀 Reddit 创意广场 - {}\n", date);
    let _ = writeln!(out, "> 每日精选 {} 个创意，深度分析\n", posts.len());

    out.push_str("## 📊 创意排行榜\n\n");
    out.push_str("| 排名 | 创意标题 | 总分 | 推荐 | 目标用户 | 商业模式 | 技术难度 | 竞争 | 市场规模 |\n");
    out.push_str("|:----:|---------|:----:|:----:|---------|---------|:----:|:----:|:----:|\n");
    for (index, item) in posts.iter().enumerate() {
        let a = &item.analysis;
        let _ = writeln!(
            out,
            "| {} | [{}]({}) | **{}** | {} | {} | {} | {} | {} | {} |",
            index + 1,
            table_cell(&short_title(&item.post.display_title())),
            item.post.url,
            a.total_score,
            a.recommendation_tier.label(),
            table_cell(&a.target_users.join(", ")),
            table_cell(&a.business_model.summary()),
            a.tech.difficulty_score,
            a.competition.score,
            a.market.size.label(),
        );
    }

    let top = top_n.min(posts.len());
    let _ = writeln!(out, "\n## 📝 Top {} 详细分析\n", top);
    for (index, item) in posts.iter().take(top).enumerate() {
        let a = &item.analysis;
        let _ = writeln!(out, "### {}. {}\n", index + 1, item.post.display_title());
        let _ = writeln!(
            out,
            "**总分**: {}/100 | **推荐度**: {}\n",
            a.total_score,
            a.recommendation_tier.label()
        );

        if let Some(notes) = &a.model_notes {
            if let Some(concept) = &notes.product_concept {
                let _ = writeln!(out, "**产品概念**: {}\n", concept);
            }
            if let Some(summary) = &notes.summary {
                let _ = writeln!(out, "**分析总结**: {}\n", summary);
            }
            if !notes.risks.is_empty() {
                let _ = writeln!(out, "**风险**: {}\n", notes.risks.join(", "));
            }
        }

        out.push_str("#### 🎯 目标用户\n");
        let _ = writeln!(out, "{}\n", join_or_undecided(&a.target_users, " · "));

        out.push_str("#### 💰 商业模式\n");
        let _ = writeln!(
            out,
            "模式: {} | 利润潜力: {}/10 | 变现方式: {}\n",
            a.business_model.summary(),
            a.business_model.profitability,
            join_or_undecided(&a.business_model.monetization, ", ")
        );

        out.push_str("#### 🔧 技术实现\n");
        let _ = writeln!(
            out,
            "难度: {}/10 {} ({})\n",
            a.tech.difficulty_score,
            a.tech.difficulty_level.label(),
            join_or_undecided(&a.tech.stack, ", ")
        );

        out.push_str("#### 📱 MVP建议\n");
        let _ = writeln!(out, "核心功能: {}", join_or_undecided(&a.mvp.features, ", "));
        let _ = writeln!(out, "创新性: {}/10", a.mvp.innovation_score);
        let _ = writeln!(
            out,
            "MVP功能: {}\n",
            join_or_undecided(&a.mvp.suggested_features, ", ")
        );

        out.push_str("#### 🚀 部署方案\n");
        let _ = writeln!(out, "部署方式: {}", join_or_undecided(&a.deployment.plan, ", "));
        let _ = writeln!(out, "预计时间: {}\n", a.deployment.estimated_duration);

        out.push_str("#### 💵 成本分析\n");
        let _ = writeln!(out, "MVP开发成本: ${}", dollars(a.cost.mvp_cost));
        let _ = writeln!(out, "月度运营成本: ${}", dollars(a.cost.monthly_cost));
        let _ = writeln!(out, "- 开发: ${}", dollars(a.cost.breakdown.dev));
        let _ = writeln!(out, "- 功能: ${}", dollars(a.cost.breakdown.features));
        let _ = writeln!(out, "- 托管: ${}\n", dollars(a.cost.breakdown.hosting));

        out.push_str("#### 🏆 竞争与市场\n");
        let _ = writeln!(out, "竞争情况: {}", a.competition.competitors.join(", "));
        let _ = writeln!(out, "市场规模: {}\n", a.market.size.label());

        let _ = writeln!(out, "**原帖**: {}\n", item.post.url);
        out.push_str("---\n\n");
    }

    out.push_str("## 📌 分析说明\n\n");
    out.push_str("- 总分范围: 0-100 分\n");
    let _ = writeln!(out, "- 推荐度: {}", TierThresholds::COMPOSITE.legend());
    out.push_str("- 数据来源: Reddit 多个创意相关 subreddit\n");
    out
}

/// Daily report on the 0–50 legacy scale. `entries` must already be ranked.
pub fn render_legacy_markdown(entries: &[LegacyEntry<'_>], date: NaiveDate, top_n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# 🚀 Reddit 创意广场 - {}\n", date);
    let _ = writeln!(out, "> 每日精选 {} 个创意，智能评分分析\n", entries.len());

    out.push_str("## 📊 创意排行榜\n\n");
    out.push_str("| 排名 | 创意标题 | 总分 | 推荐 | 商业 | 技术 | 需求 | 创新 | 竞争 | 来源 |\n");
    out.push_str("|:----:|---------|:----:|:----:|:----:|:----:|:----:|:----:|:----:|------|\n");
    for (index, entry) in entries.iter().enumerate() {
        let post = &entry.post.post;
        let s = &entry.score;
        let _ = writeln!(
            out,
            "| {} | [{}]({}) | **{}** | {} | {} | {} | {} | {} | {} | r/{} |",
            index + 1,
            table_cell(&short_title(&post.display_title())),
            post.url,
            s.total,
            s.tier().label(),
            s.business_value,
            s.technical_difficulty,
            s.user_demand,
            s.innovation,
            s.market_competition,
            post.subreddit,
        );
    }

    let top = top_n.min(entries.len());
    let _ = writeln!(out, "\n## 📝 Top {} 详细分析\n", top);
    for (index, entry) in entries.iter().take(top).enumerate() {
        let post = &entry.post.post;
        let s = &entry.score;
        let _ = writeln!(out, "### {}. {}\n", index + 1, post.display_title());
        let _ = writeln!(out, "**总分**: {}/50 | **推荐度**: {}\n", s.total, s.tier().label());
        out.push_str("**评分明细**:\n");
        let _ = writeln!(out, "- 💰 商业价值: {}/10", s.business_value);
        let _ = writeln!(out, "- 🔧 技术难度: {}/10 (分数越高越简单)", s.technical_difficulty);
        let _ = writeln!(out, "- 👥 用户需求: {}/10", s.user_demand);
        let _ = writeln!(out, "- 💡 创新性: {}/10", s.innovation);
        let _ = writeln!(
            out,
            "- 🏆 市场竞争: {}/10 (分数越高竞争越小)\n",
            s.market_competition
        );
        if !post.snippet.trim().is_empty() {
            let _ = writeln!(out, "**简介**: {}\n", post.snippet.trim());
        }
        let _ = writeln!(out, "**原帖**: {}\n", post.url);
        out.push_str("---\n\n");
    }

    out.push_str("## 📌 说明\n\n");
    out.push_str("- 评分基于关键词分析和热度指标\n");
    out.push_str("- 总分范围: 0-50 分\n");
    let _ = writeln!(out, "- 推荐度: {}", TierThresholds::LEGACY.legend());
    out.push_str("- 数据来源: Reddit 多个创意相关 subreddit\n");
    out
}
