use clap::Args;
use pump_scorer::error::AppError;
use pump_scorer::scoring::{ScoreResponse, ScoreResult, TokenFeatures, TokenRecord, TokenScorer};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Token record JSON file (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Print the HTTP response payload instead of the readable summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the extracted feature values in the summary
    #[arg(long)]
    pub(crate) features: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        json,
        features,
    } = args;

    let record = match input {
        Some(path) => load_record(BufReader::new(File::open(path)?))?,
        None => load_record(io::stdin().lock())?,
    };

    let scorer = TokenScorer::new();
    let result = scorer.try_score(&record)?;

    if json {
        let payload = serde_json::to_string_pretty(&ScoreResponse::from(result))?;
        println!("{payload}");
    } else {
        let extracted = features.then(|| scorer.extract_features(&record));
        print!("{}", render_score(&record, &result, extracted.as_ref()));
    }

    Ok(())
}

pub(crate) fn load_record<R: Read>(reader: R) -> Result<TokenRecord, AppError> {
    let record: TokenRecord = serde_json::from_reader(reader)?;
    record.validate()?;
    Ok(record)
}

pub(crate) fn render_score(
    record: &TokenRecord,
    result: &ScoreResult,
    features: Option<&TokenFeatures>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Token: {}", record.name);
    let _ = writeln!(
        out,
        "Pump probability: {:.0}% (raw score {:.2})",
        result.probability * 100.0,
        result.raw_score
    );
    let _ = writeln!(out, "{}", result.explanation);

    if result.factors.is_empty() {
        let _ = writeln!(out, "\nFactors: none fired");
    } else {
        let _ = writeln!(out, "\nFactors");
        for factor in result.factors.iter() {
            let _ = writeln!(out, "- {}: {:+.2}", factor.label, factor.contribution);
        }
    }

    if let Some(features) = features {
        let _ = writeln!(out, "\nFeatures");
        for (name, value) in features.to_map() {
            let _ = writeln!(out, "- {name}: {value}");
        }
    }

    out
}
