//! Fetch review summaries and print the ranking.

use anyhow::{anyhow, Result};
use review_sdk::prelude::*;

use super::FetchArgs;
use crate::context::Context;
use crate::output::{descriptor_badge, format_duration_us};

const WIDTHS: [usize; 7] = [4, 20, 10, 10, 10, 9, 10];

/// Run the fetch command.
pub async fn run(args: FetchArgs, ctx: &Context) -> Result<()> {
    let pipeline = ctx.pipeline(args.timeout)?;
    let format = if ctx.output.is_json() {
        LogFormat::Json
    } else {
        LogFormat::Human
    };
    let logger = StructuredLogger::new(RequestId::generate())
        .with_component("cli")
        .with_format(format);

    let spinner = ctx.output.spinner("Fetching review summaries...");
    let result = pipeline.run_logged(&logger).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        let failure = result.as_ref().err().cloned();
        ctx.output.json(&ReviewsOutcome::from(result.map(|run| run.report)));
        return match failure {
            Some(err) => Err(anyhow!(ReviewsOutcome::failure_message(&err))),
            None => Ok(()),
        };
    }

    let run = result.map_err(|err| anyhow!(ReviewsOutcome::failure_message(&err)))?;

    print_report(&run.report, ctx);
    if args.metrics {
        print_metrics(&run.metrics, ctx);
    }

    ctx.output.debug(&format!(
        "Request {} finished in {}",
        run.metrics.request_id,
        format_duration_us(run.timing.elapsed().as_micros() as u64)
    ));

    Ok(())
}

/// Print the aggregate summary and the ranked table.
pub fn print_report(report: &ReviewReport, ctx: &Context) {
    let all = &report.all;
    ctx.output.header(&all.language_name);
    ctx.output.kv("总评价数", &all.total_reviews.to_string());
    ctx.output.kv("好评", &all.total_positive.to_string());
    ctx.output.kv("差评", &all.total_negative.to_string());
    ctx.output.kv("好评率", &all.positive_rate);
    ctx.output.kv("评价", &descriptor_badge(&all.review_score_desc_cn));

    ctx.output.header("Languages");
    ctx.output.table_row(
        &["#", "语言", "总评价数", "好评", "差评", "好评率", "评价"],
        &WIDTHS,
    );
    for (rank, (_, record)) in report.ranked.iter().enumerate() {
        let cols = [
            (rank + 1).to_string(),
            record.language_name.clone(),
            record.total_reviews.to_string(),
            record.total_positive.to_string(),
            record.total_negative.to_string(),
            record.positive_rate.clone(),
            descriptor_badge(&record.review_score_desc_cn),
        ];
        let cols: Vec<&str> = cols.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &WIDTHS);
    }
}

fn print_metrics(metrics: &InvocationMetrics, ctx: &Context) {
    ctx.output.header("Requests");
    for fetch in &metrics.fetches {
        let status = if fetch.success {
            fetch.status_code.map(|s| s.to_string()).unwrap_or_default()
        } else {
            format!("FAILED ({})", fetch.error.as_deref().unwrap_or("unknown"))
        };
        ctx.output.kv(
            &fetch.filter,
            &format!("{} {}", format_duration_us(fetch.duration_us), status),
        );
    }
    if let Some(slowest) = metrics.slowest() {
        ctx.output.kv("slowest", &slowest.filter);
    }
}
