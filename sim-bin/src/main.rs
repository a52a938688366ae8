mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use simdist::{Capabilities, Engine, Params};
use std::ops::ControlFlow;

use cli::{Cli, Metric};

#[derive(Serialize)]
struct Record<'a> {
    metric: Metric,
    a: &'a str,
    b: &'a str,
    /// A distance, or a score for `align`.
    value: i128,
    /// Set when the value is a sentinel rather than a result.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

#[derive(Serialize)]
struct Setup {
    params: Params,
    capabilities: Capabilities,
    lane_capacity: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();
    let params = args.params()?;
    let engine = Engine::new(params);
    log::debug!("{engine:?}");

    if args.print_params {
        let setup = Setup {
            params,
            capabilities: Capabilities::detect(),
            lane_capacity: engine.policy().lane_capacity(),
        };
        println!("{}", serde_json::to_string_pretty(&setup)?);
        return Ok(());
    }

    let bound = args.bound();
    let table = args.table();
    let mut failed = None;
    args.process_input_pairs(|a, b| {
        let (value, error) = match args.metric {
            Metric::Edit => distance(engine.try_edit_distance(a, b, bound)),
            Metric::EditUtf8 => distance(engine.try_edit_distance_utf8(a, b, bound)),
            Metric::Hamming => (engine.hamming_distance(a, b, bound) as i128, None),
            Metric::HammingUtf8 => distance(engine.try_hamming_distance_utf8(a, b, bound)),
            Metric::Align => match engine.try_alignment_score(a, b, &table, args.gap) {
                Ok(s) => (s as i128, None),
                Err(e) => (simdist::SCORE_ALLOC_FAILURE as i128, Some(describe(&e))),
            },
        };
        if args.json {
            let record = Record {
                metric: args.metric,
                a: &String::from_utf8_lossy(a),
                b: &String::from_utf8_lossy(b),
                value,
                error,
            };
            match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    failed = Some(anyhow::Error::from(e));
                    return ControlFlow::Break(());
                }
            }
        } else if let Some(error) = error {
            println!("{value}\t{error}");
        } else {
            println!("{value}");
        }
        ControlFlow::Continue(())
    })?;
    failed.map_or(Ok(()), Err)
}

fn distance(r: Result<simdist::Cost, simdist::Error>) -> (i128, Option<&'static str>) {
    match r {
        Ok(d) => (d as i128, None),
        Err(e) => (e.distance_sentinel() as i128, Some(describe(&e))),
    }
}

fn describe(e: &simdist::Error) -> &'static str {
    match e {
        simdist::Error::Alloc(_) => "allocation failed",
        simdist::Error::Utf8(_) => "invalid utf-8",
    }
}
