use std::fmt;
use std::str::FromStr;

const TOKEN_PREVIEW_CHARS: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProxyParseError {
    #[error("expected username:password@host:port, got {0:?}")]
    Malformed(String),
    #[error("empty host in {0:?}")]
    EmptyHost(String),
    #[error("invalid port {port:?} in {input:?}")]
    InvalidPort { input: String, port: String },
}

/// HTTP proxy parsed from `username:password@host:port`.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl ProxyDescriptor {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl FromStr for ProxyDescriptor {
    type Err = ProxyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let malformed = || ProxyParseError::Malformed(input.to_string());

        let (user_pass, host_port) = input.rsplit_once('@').ok_or_else(malformed)?;
        let (username, password) = user_pass.split_once(':').ok_or_else(malformed)?;
        let (host, port) = host_port.rsplit_once(':').ok_or_else(malformed)?;

        if host.is_empty() {
            return Err(ProxyParseError::EmptyHost(input.to_string()));
        }
        let port = port.parse::<u16>().map_err(|_| ProxyParseError::InvalidPort {
            input: input.to_string(),
            port: port.to_string(),
        })?;

        Ok(Self {
            host: host.to_string(),
            port,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

// The password never reaches logs.
impl fmt::Debug for ProxyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ProxyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:****@{}:{}", self.username, self.host, self.port)
    }
}

/// Wallet, bearer token and proxy bound to one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialTriple {
    pub wallet: String,
    pub token: String,
    pub proxy: ProxyDescriptor,
}

impl CredentialTriple {
    pub fn token_preview(&self) -> String {
        self.token.chars().take(TOKEN_PREVIEW_CHARS).collect()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "Number of wallets and tokens do not match ({wallets} wallets, {tokens} tokens). \
         Please ensure each wallet has a corresponding token."
    )]
    CountMismatch { wallets: usize, tokens: usize },
    #[error(
        "Not enough proxies for all wallets ({proxies} proxies, {wallets} wallets). \
         Please add more proxies."
    )]
    NotEnoughProxies { wallets: usize, proxies: usize },
    #[error("invalid proxy on line {line}: {source}")]
    InvalidProxy {
        line: usize,
        #[source]
        source: ProxyParseError,
    },
}

/// One record per non-empty trimmed line.
pub fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Pairs wallet `i` with token `i` and proxy `i % proxies.len()`.
///
/// Fails before anything is built when the lists are inconsistent or an
/// assigned proxy does not parse.
pub fn assemble_credentials(
    wallets: Vec<String>,
    tokens: Vec<String>,
    proxies: &[String],
) -> Result<Vec<CredentialTriple>, CredentialError> {
    if wallets.len() != tokens.len() {
        return Err(CredentialError::CountMismatch {
            wallets: wallets.len(),
            tokens: tokens.len(),
        });
    }
    if wallets.len() > proxies.len() {
        return Err(CredentialError::NotEnoughProxies {
            wallets: wallets.len(),
            proxies: proxies.len(),
        });
    }

    wallets
        .into_iter()
        .zip(tokens)
        .enumerate()
        .map(|(index, (wallet, token))| {
            let slot = index % proxies.len();
            let proxy = proxies[slot]
                .parse::<ProxyDescriptor>()
                .map_err(|source| CredentialError::InvalidProxy {
                    line: slot + 1,
                    source,
                })?;
            Ok(CredentialTriple {
                wallet,
                token,
                proxy,
            })
        })
        .collect()
}
