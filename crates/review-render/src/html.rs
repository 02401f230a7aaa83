//! Review report to HTML.

use review_report::{LocaleReviewRecord, ReviewReport};

use crate::{escape_html, HeadContent, Shell};

/// Timestamp layout shown in the report footer.
pub const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const REPORT_CSS: &str = "\
body{margin:0;padding:32px;background:#1b2838;color:#c7d5e0;font-family:'Noto Sans CJK SC','Microsoft YaHei',sans-serif;}\
.summary{background:#2a475e;border-radius:8px;padding:24px;margin-bottom:24px;}\
.summary h1{margin:0 0 12px;color:#ffffff;font-size:32px;}\
.summary .stats{display:flex;gap:32px;font-size:22px;}\
.rate{color:#66c0f4;font-weight:bold;}\
table{width:100%;border-collapse:collapse;font-size:20px;}\
th{background:#2a475e;color:#ffffff;text-align:left;padding:12px;}\
td{padding:10px 12px;border-bottom:1px solid #3d5a73;}\
tr:nth-child(even) td{background:#213447;}\
.positive{color:#a4d007;}\
.negative{color:#c35c2c;}\
footer{margin-top:24px;font-size:16px;color:#8f98a0;text-align:right;}";

/// Current local time in [`LAST_UPDATE_FORMAT`].
pub fn last_update_now() -> String {
    chrono::Local::now().format(LAST_UPDATE_FORMAT).to_string()
}

/// Render a full HTML document for a report.
///
/// Every piece of record text is escaped; `last_update` is shown verbatim
/// after escaping.
pub fn render_report_html(report: &ReviewReport, last_update: &str) -> String {
    let shell = Shell::new(
        HeadContent::new("Steam 评价统计")
            .with_meta("viewport", "width=2500")
            .with_style(REPORT_CSS),
    )
    .with_body_class("reviews-report");

    let rows: String = report
        .ranked
        .iter()
        .enumerate()
        .map(|(index, (_, record))| render_row(index + 1, record))
        .collect();

    let body = format!(
        r#"{summary}
<section class="ranking" data-section="languages">
    <table>
        <thead>
            <tr><th>排名</th><th>语言</th><th>总评价数</th><th>好评</th><th>差评</th><th>好评率</th><th>评价</th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
</section>
<footer>最后更新: {last_update}</footer>"#,
        summary = render_summary(&report.all),
        rows = rows,
        last_update = escape_html(last_update)
    );

    shell.wrap(&body)
}

fn render_summary(all: &LocaleReviewRecord) -> String {
    format!(
        r#"<section class="summary" data-section="all">
    <h1>{name}</h1>
    <div class="stats">
        <span>总评价数: {total}</span>
        <span class="positive">好评: {positive}</span>
        <span class="negative">差评: {negative}</span>
        <span>好评率: <span class="rate">{rate}</span></span>
        <span title="{desc}">{desc_cn}</span>
    </div>
</section>"#,
        name = escape_html(&all.language_name),
        total = all.total_reviews,
        positive = all.total_positive,
        negative = all.total_negative,
        rate = escape_html(&all.positive_rate),
        desc = escape_html(&all.review_score_desc),
        desc_cn = escape_html(&all.review_score_desc_cn)
    )
}

fn render_row(rank: usize, record: &LocaleReviewRecord) -> String {
    format!(
        "            <tr><td>{rank}</td><td>{name}</td><td>{total}</td><td class=\"positive\">{positive}</td><td class=\"negative\">{negative}</td><td class=\"rate\">{rate}</td><td title=\"{desc}\">{desc_cn}</td></tr>\n",
        rank = rank,
        name = escape_html(&record.language_name),
        total = record.total_reviews,
        positive = record.total_positive,
        negative = record.total_negative,
        rate = escape_html(&record.positive_rate),
        desc = escape_html(&record.review_score_desc),
        desc_cn = escape_html(&record.review_score_desc_cn)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_core::ReviewFilter;
    use review_data::{FetchedReviews, QuerySummary, RawReviewResponse};
    use review_report::build_report;

    fn report() -> ReviewReport {
        let fetched = FetchedReviews::new()
            .with(
                ReviewFilter::AllLanguages,
                RawReviewResponse::with_summary(QuerySummary::new(80, 20, 100, "Positive")),
            )
            .with(
                ReviewFilter::language("german"),
                RawReviewResponse::with_summary(QuerySummary::new(5, 5, 10, "Mixed")),
            )
            .with(
                ReviewFilter::language("english"),
                RawReviewResponse::with_summary(QuerySummary::new(40, 10, 50, "Very Positive")),
            );
        build_report(&fetched)
    }

    #[test]
    fn test_report_contains_summary_and_rows() {
        let html = render_report_html(&report(), "2025-10-10 12:00:00");

        assert!(html.contains("<h1>所有语言</h1>"));
        assert!(html.contains(r#"<span class="rate">80.00%</span>"#));
        assert!(html.contains("最后更新: 2025-10-10 12:00:00"));

        let english = html.find("<td>英语</td>").unwrap();
        let german = html.find("<td>德语</td>").unwrap();
        assert!(english < german);
        assert!(html.contains("<tr><td>1</td><td>英语</td><td>50</td>"));
        assert!(html.contains("<tr><td>2</td><td>德语</td><td>10</td>"));
    }

    #[test]
    fn test_record_text_is_escaped() {
        let fetched = FetchedReviews::new().with(
            ReviewFilter::language("<script>"),
            RawReviewResponse::with_summary(QuerySummary::new(1, 0, 1, "A & <B>")),
        );
        let html = render_report_html(&build_report(&fetched), "now");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; &lt;B&gt;"));
    }

    #[test]
    fn test_empty_report_renders() {
        let html = render_report_html(&build_report(&FetchedReviews::new()), "now");
        assert!(html.contains("0.00%"));
        assert!(html.contains("未知"));
        assert!(!html.contains("<tr><td>1</td>"));
    }

    #[test]
    fn test_last_update_format() {
        let stamp = last_update_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, LAST_UPDATE_FORMAT).is_ok());
    }
}
