//! ktmine CLI entry point

use std::process::ExitCode;

use clap::Parser;

use ktmine::{
    extract_corpus, to_dataset_rows, to_rows, verify, write_dataset_csv, write_function_csv,
    write_function_json, Cli, CorpusSummary, GoldenOutcome, KtMineError, OutputFormat,
};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> ktmine::Result<String> {
    let cli = Cli::parse();

    // 1. Check corpus directory exists
    if !cli.corpus.exists() {
        return Err(KtMineError::CorpusUnreadable {
            path: cli.corpus.display().to_string(),
        });
    }

    // 2. Golden verification first, so a broken pipeline never produces a
    //    corpus table
    if let (Some(sample), Some(table), Some(out)) =
        (&cli.golden_sample, &cli.golden_table, &cli.golden_out)
    {
        match verify(sample, table, out)? {
            GoldenOutcome::Pass => {
                eprintln!("Golden test passed, result saved to {}", out.display());
            }
            GoldenOutcome::Mismatch { message } => {
                return Err(KtMineError::GoldenMismatch { message });
            }
        }
    }

    // 3. Walk the corpus
    let (table, report) = extract_corpus(&cli.corpus, cli.keep_empty, !cli.no_progress)?;

    if cli.verbose {
        eprintln!(
            "Processed {} files ({} skipped: {} unreadable, {} unparseable)",
            report.files,
            report.skipped(),
            report.skipped_unreadable,
            report.skipped_unparseable
        );
    }

    // 4. Flatten and write the function table
    let rows = to_rows(&table);
    match cli.format {
        OutputFormat::Csv => write_function_csv(&cli.functions_out, &rows)?,
        OutputFormat::Json => write_function_json(&cli.functions_out, &rows)?,
    }

    if cli.verbose {
        eprintln!(
            "Wrote {} rows to {}",
            rows.len(),
            cli.functions_out.display()
        );
    }

    // 5. Optional downstream dataset with synthesized signatures
    if let Some(dataset_out) = &cli.dataset_out {
        let dataset = to_dataset_rows(&rows);
        write_dataset_csv(dataset_out, &dataset)?;
        if cli.verbose {
            eprintln!("Wrote dataset to {}", dataset_out.display());
        }
    }

    Ok(CorpusSummary::from_rows(&rows).report())
}
