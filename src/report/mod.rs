use std::path::{Path, PathBuf};

use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use serde_json::json;

use crate::minimize::MinimizationResult;

/// Output format for the run summary.
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Writes the summary of a minimization run.
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    pub fn report(&self, result: &MinimizationResult, output_jar: &Path) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => self.report_terminal(result, output_jar),
            ReportFormat::Json => self.report_json(result, output_jar),
        }
    }

    fn report_terminal(&self, result: &MinimizationResult, output_jar: &Path) -> Result<()> {
        let before = result.candidates_before();
        let after = result.candidates_after();
        // forced jars can push the kept count past the candidate count
        let removed = before.saturating_sub(after);
        let percent = if before > 0 {
            100.0 * removed as f64 / before as f64
        } else {
            0.0
        };

        println!();
        println!("{}", "Minimization complete".green().bold());
        println!("  sources analyzed:  {}", result.source_count());
        println!("  library classes:   {before}");
        println!("  classes kept:      {after} ({percent:.1}% removed, {removed} classes)");
        println!("  elapsed:           {:.2?}", result.elapsed());
        println!(
            "  output:            {}",
            output_jar.display().to_string().cyan()
        );
        Ok(())
    }

    fn report_json(&self, result: &MinimizationResult, output_jar: &Path) -> Result<()> {
        let names: Vec<String> = result
            .names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let report = json!({
            "sources": result.source_count(),
            "candidates_before": result.candidates_before(),
            "candidates_after": result.candidates_after(),
            "elapsed_ms": result.elapsed().as_millis() as u64,
            "output": output_jar.display().to_string(),
            "classes": names,
        });
        let rendered = serde_json::to_string_pretty(&report).into_diagnostic()?;

        match &self.output_path {
            Some(path) => std::fs::write(path, rendered).into_diagnostic()?,
            None => println!("{rendered}"),
        }
        Ok(())
    }
}
