//! One extraction run: load, extract both name sets, write both files.

use std::path::{Path, PathBuf};

use crate::capture;
use crate::config::SluiceConfig;
use crate::error::ExtractError;
use crate::extract::{extract_cookies, extract_parameters, ParamOptions};
use crate::names;

const COOKIES_SUFFIX: &str = "_cookies.txt";
const PARAMS_SUFFIX: &str = "_params.txt";

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub items: usize,
    pub cookies: usize,
    pub params: usize,
    pub cookies_path: PathBuf,
    pub params_path: PathBuf,
}

/// Paths of the cookie and parameter lists for `base`: `{base}_cookies.txt`
/// and `{base}_params.txt`.
pub fn output_paths(base: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{base}{COOKIES_SUFFIX}")),
        PathBuf::from(format!("{base}{PARAMS_SUFFIX}")),
    )
}

/// Extracts cookie and parameter names from the export at `input` and writes
/// them next to `output_base`.
///
/// No output file is touched unless the input loads. If the parameter file
/// fails to write, the cookie file already written is left in place.
pub fn run(input: &Path, output_base: &str, cfg: &SluiceConfig) -> Result<RunSummary, ExtractError> {
    tracing::info!("extracting names from {}", input.display());
    let doc = capture::load(input, &cfg.tags)?;

    let cookies = extract_cookies(&doc);
    let params = extract_parameters(
        &doc,
        ParamOptions {
            json_keys: cfg.extract_json_keys,
        },
    );
    tracing::debug!(
        items = doc.len(),
        cookies = cookies.len(),
        params = params.len(),
        "extraction complete"
    );

    let (cookies_path, params_path) = output_paths(output_base);
    names::write(&cookies, &cookies_path)?;
    names::write(&params, &params_path)?;

    tracing::info!(
        "wrote {} and {}",
        cookies_path.display(),
        params_path.display()
    );

    Ok(RunSummary {
        items: doc.len(),
        cookies: cookies.len(),
        params: params.len(),
        cookies_path,
        params_path,
    })
}
