//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use itinera_domain::traits::LlmProvider;
use itinera_domain::{ParseReport, ParsedItinerary};
use itinera_extractor::LlmExtractor;
use itinera_llm::OllamaProvider;
use itinera_parser::ItineraryParser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

/// Execute the parse command.
pub async fn execute_parse(args: ParseArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let bytes = read_input(&args)?;

    let report = if args.llm {
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| CliError::InvalidInput(format!("document is not valid UTF-8: {}", e)))?;
        let endpoint = args.endpoint.unwrap_or_else(|| config.llm.endpoint.clone());
        let model = args.model.unwrap_or_else(|| config.llm.model.clone());
        info!("Using model {} at {}", model, endpoint);

        let provider =
            OllamaProvider::new(endpoint, model)?.with_max_retries(config.llm.max_retries);
        extract_with(provider, text, config).await?
    } else {
        parse_heuristic(&bytes, config)?
    };

    for failure in &report.failures {
        eprintln!("{}", formatter.failure(failure));
    }
    println!("{}", formatter.format_report(&report)?);

    if let Some(dir) = args.out_dir {
        let path = write_record(&report.itinerary, Path::new(&dir))?;
        eprintln!("{}", formatter.success(&format!("Wrote {}", path.display())));
    }

    Ok(())
}

/// Read the document from the named file or stdin.
fn read_input(args: &ParseArgs) -> Result<Vec<u8>> {
    if args.stdin {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Ok(buffer)
    } else if let Some(file_path) = &args.file {
        Ok(fs::read(file_path)?)
    } else {
        Err(CliError::InvalidInput(
            "Must specify either a FILE or --stdin".to_string(),
        ))
    }
}

/// Run the heuristic parser over raw document bytes.
pub fn parse_heuristic(bytes: &[u8], config: &Config) -> Result<ParseReport> {
    let parser = ItineraryParser::new(config.parser.clone())?;
    Ok(parser.parse_bytes(bytes)?)
}

/// Run the LLM-assisted extractor with the given provider.
pub async fn extract_with<L>(llm: L, text: &str, config: &Config) -> Result<ParseReport>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let extractor = LlmExtractor::new(llm, config.extractor.clone())?
        .with_parser_config(config.parser.clone());
    Ok(extractor.extract(text).await?)
}

/// Write `<dir>/<slug>.json`, returning the path written.
pub fn write_record(record: &ParsedItinerary, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("{}.json", record.slug));
    let mut contents = serde_json::to_string_pretty(record)?;
    contents.push('\n');
    fs::write(&path, contents)?;

    info!("Wrote {} ({} days)", path.display(), record.itinerary.len());
    Ok(path)
}
