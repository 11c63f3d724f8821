use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::PredictionRequest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Base URL of the prediction service
    #[arg(long, env = "ENDPOINT", default_value = "http://127.0.0.1:5000")]
    pub endpoint: String,

    /// Form field in KEY=VALUE form, repeatable
    #[arg(short = 'F', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// JSON file holding a flat object of form fields
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Fetch the service health report instead of predicting
    #[arg(long)]
    pub health: bool,
}

impl Config {
    /// Fields given on the command line. Pairs without a `=` are dropped,
    /// a repeated key keeps the last value.
    pub fn parse_fields(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                Some((key.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Assembles the form from `--input` first, then `--field` overrides.
    pub fn collect_form(&self) -> anyhow::Result<PredictionRequest> {
        let mut form = PredictionRequest::default();
        if let Some(path) = &self.input {
            let raw = std::fs::read_to_string(path)?;
            let file_fields: BTreeMap<String, String> = serde_json::from_str(&raw)?;
            form.fields.extend(file_fields);
        }
        form.fields.extend(self.parse_fields());
        Ok(form)
    }
}
