use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use simdist::{BackendKind, Cost, Params, Score, SubstitutionTable, UNBOUNDED};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::PathBuf,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Levenshtein distance over bytes.
    Edit,
    /// Levenshtein distance over UTF-8 codepoints.
    EditUtf8,
    /// Hamming distance over bytes.
    Hamming,
    /// Hamming distance over UTF-8 codepoints.
    HammingUtf8,
    /// Needleman-Wunsch alignment score.
    Align,
}

#[derive(Parser, Debug)]
#[clap(author, about)]
pub struct Cli {
    /// The similarity to compute.
    #[clap(value_enum)]
    pub metric: Metric,

    /// First string. Pairs are read from `--input` when omitted.
    pub a: Option<String>,

    /// Second string.
    #[clap(requires = "a")]
    pub b: Option<String>,

    /// A .txt file with one string per line, a .seq file with `>a` and `<b`
    /// lines, or a .tsv file with one tab-separated pair per line.
    #[clap(short, long, conflicts_with = "a")]
    pub input: Option<PathBuf>,

    /// Report distances above this as `bound + 1`. For Hamming, 0 means unbounded.
    #[clap(short, long)]
    pub bound: Option<Cost>,

    /// A JSON file with engine parameters. Flags below override it.
    #[clap(long)]
    pub params: Option<PathBuf>,

    #[clap(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Largest lane kernel to use: 64, 128 or 256.
    #[clap(long)]
    pub max_lane_width: Option<usize>,

    /// Reject malformed UTF-8 in the UTF-8 metrics.
    #[clap(long)]
    pub validate_utf8: bool,

    /// Substitution score for equal bytes.
    #[clap(
        long = "match",
        default_value_t = 0,
        allow_negative_numbers = true,
        help_heading = "Alignment"
    )]
    pub match_score: i8,

    /// Substitution score for different bytes.
    #[clap(
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        help_heading = "Alignment"
    )]
    pub mismatch: i8,

    /// Score of every inserted or deleted byte.
    #[clap(
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        help_heading = "Alignment"
    )]
    pub gap: Score,

    /// Print one JSON object per pair.
    #[clap(long)]
    pub json: bool,

    /// Print the effective parameters and detected CPU capabilities, then exit.
    #[clap(long)]
    pub print_params: bool,
}

impl Cli {
    pub fn bound(&self) -> Cost {
        match self.metric {
            Metric::Hamming | Metric::HammingUtf8 => self.bound.unwrap_or(0),
            _ => self.bound.unwrap_or(UNBOUNDED),
        }
    }

    /// Parameters from `--params`, overridden by the flags.
    pub fn params(&self) -> Result<Params> {
        let mut params = match &self.params {
            Some(path) => {
                let file =
                    File::open(path).with_context(|| format!("opening {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Params::default(),
        };
        if let Some(backend) = self.backend {
            params.backend = backend;
        }
        if let Some(w) = self.max_lane_width {
            params.max_lane_width = Some(w);
        }
        if self.validate_utf8 {
            params = params.validate_utf8();
        }
        Ok(params)
    }

    pub fn table(&self) -> SubstitutionTable {
        SubstitutionTable::from_costs(self.match_score, self.mismatch)
    }

    /// Call `run_pair` for each input pair.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(&[u8], &[u8]) -> ControlFlow<()>,
    ) -> Result<()> {
        if let Some(a) = &self.a {
            let Some(b) = &self.b else {
                bail!("two strings are needed, got one");
            };
            let _ = run_pair(a.as_bytes(), b.as_bytes());
            return Ok(());
        }
        let Some(input) = &self.input else {
            bail!("pass two strings or an --input file");
        };
        let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
        let lines: Vec<Vec<u8>> = BufReader::new(file)
            .split(b'\n')
            .map_ok(|mut l| {
                if l.last() == Some(&b'\r') {
                    l.pop();
                }
                l
            })
            .collect::<std::io::Result<_>>()
            .with_context(|| format!("reading {}", input.display()))?;

        let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "tsv" => {
                for (i, line) in lines.iter().enumerate().filter(|(_, l)| !l.is_empty()) {
                    let Some(tab) = line.iter().position(|&c| c == b'\t') else {
                        bail!("{}:{}: expected a tab-separated pair", input.display(), i + 1);
                    };
                    if run_pair(&line[..tab], &line[tab + 1..]).is_break() {
                        break;
                    }
                }
            }
            "seq" | "txt" => {
                if lines.len() % 2 != 0 {
                    log::warn!("{}: ignoring unpaired last line", input.display());
                }
                for (a, b) in lines.iter().tuples() {
                    let (a, b) = if ext == "seq" {
                        match (a.strip_prefix(b">"), b.strip_prefix(b"<")) {
                            (Some(a), Some(b)) => (a, b),
                            _ => bail!("{}: expected `>` and `<` lines", input.display()),
                        }
                    } else {
                        (&a[..], &b[..])
                    };
                    if run_pair(a, b).is_break() {
                        break;
                    }
                }
            }
            ext => bail!("unknown file extension {ext:?}; must be one of seq, txt, tsv"),
        }
        Ok(())
    }
}
