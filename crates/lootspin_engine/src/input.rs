use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lootspin_core::{assemble_credentials, parse_lines, CredentialError, CredentialTriple};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Error reading file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub wallets: PathBuf,
    pub tokens: PathBuf,
    pub proxies: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            wallets: PathBuf::from("./wallet.txt"),
            tokens: PathBuf::from("./token.txt"),
            proxies: PathBuf::from("./proxy.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInputs {
    pub credentials: Vec<CredentialTriple>,
    pub wallet_count: usize,
    pub token_count: usize,
    pub proxy_count: usize,
}

/// Reads one record per non-empty trimmed line.
pub fn read_lines(path: &Path) -> Result<Vec<String>, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_lines(&raw))
}

/// Loads and validates all three input files.
pub fn load_credentials(paths: &InputPaths) -> Result<LoadedInputs, InputError> {
    let wallets = read_lines(&paths.wallets)?;
    let tokens = read_lines(&paths.tokens)?;
    let proxies = read_lines(&paths.proxies)?;

    let wallet_count = wallets.len();
    let token_count = tokens.len();
    let proxy_count = proxies.len();
    let credentials = assemble_credentials(wallets, tokens, &proxies)?;

    Ok(LoadedInputs {
        credentials,
        wallet_count,
        token_count,
        proxy_count,
    })
}
