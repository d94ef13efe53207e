//! Data-source descriptors and the concurrent snapshot loader.

use std::env;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::payloads::{
    CompositePayload, DepegPayload, GeniusPayload, HasMetadata, LayersPayload, RemittancePayload,
    ReservesPayload, SupplyPayload, TaxPayload, VolumePayload, WalletsPayload, YieldPayload,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKey {
    Layers,
    Supply,
    Volume,
    Remittance,
    Genius,
    Wallets,
    Reserves,
    Tax,
    YieldRates,
    Depegs,
    Composite,
}

impl SourceKey {
    pub const ALL: [SourceKey; 11] = [
        SourceKey::Layers,
        SourceKey::Supply,
        SourceKey::Volume,
        SourceKey::Remittance,
        SourceKey::Genius,
        SourceKey::Wallets,
        SourceKey::Reserves,
        SourceKey::Tax,
        SourceKey::YieldRates,
        SourceKey::Depegs,
        SourceKey::Composite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceKey::Layers => "layers",
            SourceKey::Supply => "supply",
            SourceKey::Volume => "volume",
            SourceKey::Remittance => "remittance",
            SourceKey::Genius => "genius",
            SourceKey::Wallets => "wallets",
            SourceKey::Reserves => "reserves",
            SourceKey::Tax => "tax",
            SourceKey::YieldRates => "yield_rates",
            SourceKey::Depegs => "depegs",
            SourceKey::Composite => "composite",
        }
    }

    /// Location relative to the data root.
    pub fn location(self) -> &'static str {
        match self {
            SourceKey::Layers => "adoption/layers.json",
            SourceKey::Supply => "onchain/supply.json",
            SourceKey::Volume => "onchain/volume.json",
            SourceKey::Remittance => "remittance/comparison.json",
            SourceKey::Genius => "regulatory/genius_act.json",
            SourceKey::Wallets => "onchain/wallets.json",
            SourceKey::Reserves => "treasury/reserves.json",
            SourceKey::Tax => "tax/status.json",
            SourceKey::YieldRates => "yield/rates.json",
            SourceKey::Depegs => "onchain/depegs.json",
            SourceKey::Composite => "composite/signal.json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRoot {
    Http { base_url: String },
    Directory(PathBuf),
}

impl DataRoot {
    /// `http://` and `https://` prefixes select HTTP; anything else is a directory.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataRoot::Http {
                base_url: trimmed.trim_end_matches('/').to_string(),
            }
        } else {
            DataRoot::Directory(PathBuf::from(trimmed))
        }
    }

    pub fn resolve(&self, location: &str) -> String {
        match self {
            DataRoot::Http { base_url } => format!("{base_url}/{location}"),
            DataRoot::Directory(dir) => dir.join(location).display().to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DataRoot::Http { .. } => "http",
            DataRoot::Directory(_) => "directory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub root: DataRoot,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root: DataRoot::Directory(PathBuf::from("data")),
        }
    }
}

pub fn loader_config_from_env() -> LoaderConfig {
    let mut config = LoaderConfig::default();

    if let Ok(root) = env::var("STABLELADDER_DATA_ROOT") {
        if !root.trim().is_empty() {
            config.root = DataRoot::parse(&root);
        }
    }

    config
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed for {url}: {message}")]
    Http { url: String, message: String },
    #[error("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Every payload the renderers consume, `None` where loading failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub layers: Option<LayersPayload>,
    pub supply: Option<SupplyPayload>,
    pub volume: Option<VolumePayload>,
    pub remittance: Option<RemittancePayload>,
    pub genius: Option<GeniusPayload>,
    pub wallets: Option<WalletsPayload>,
    pub reserves: Option<ReservesPayload>,
    pub tax: Option<TaxPayload>,
    pub yield_rates: Option<YieldPayload>,
    pub depegs: Option<DepegPayload>,
    pub composite: Option<CompositePayload>,
}

impl Snapshot {
    fn payload(&self, key: SourceKey) -> Option<&dyn HasMetadata> {
        fn erase<T: HasMetadata>(p: &Option<T>) -> Option<&dyn HasMetadata> {
            p.as_ref().map(|p| p as &dyn HasMetadata)
        }

        match key {
            SourceKey::Layers => erase(&self.layers),
            SourceKey::Supply => erase(&self.supply),
            SourceKey::Volume => erase(&self.volume),
            SourceKey::Remittance => erase(&self.remittance),
            SourceKey::Genius => erase(&self.genius),
            SourceKey::Wallets => erase(&self.wallets),
            SourceKey::Reserves => erase(&self.reserves),
            SourceKey::Tax => erase(&self.tax),
            SourceKey::YieldRates => erase(&self.yield_rates),
            SourceKey::Depegs => erase(&self.depegs),
            SourceKey::Composite => erase(&self.composite),
        }
    }

    pub fn is_loaded(&self, key: SourceKey) -> bool {
        self.payload(key).is_some()
    }

    pub fn last_updated(&self, key: SourceKey) -> Option<&str> {
        self.payload(key).and_then(|p| p.last_updated())
    }

    pub fn loaded_count(&self) -> usize {
        SourceKey::ALL
            .iter()
            .filter(|key| self.is_loaded(**key))
            .count()
    }
}

/// Fetches every source concurrently and waits for all of them.
/// A failing source becomes `None` and never affects its siblings.
pub async fn load_snapshot(config: &LoaderConfig) -> Snapshot {
    let client = reqwest::Client::new();
    let root = &config.root;

    info!(
        component = "loader",
        event = "load.start",
        root_kind = root.kind(),
        sources = SourceKey::ALL.len()
    );

    let (
        layers,
        supply,
        volume,
        remittance,
        genius,
        wallets,
        reserves,
        tax,
        yield_rates,
        depegs,
        composite,
    ) = tokio::join!(
        load_source(&client, root, SourceKey::Layers),
        load_source(&client, root, SourceKey::Supply),
        load_source(&client, root, SourceKey::Volume),
        load_source(&client, root, SourceKey::Remittance),
        load_source(&client, root, SourceKey::Genius),
        load_source(&client, root, SourceKey::Wallets),
        load_source(&client, root, SourceKey::Reserves),
        load_source(&client, root, SourceKey::Tax),
        load_source(&client, root, SourceKey::YieldRates),
        load_source(&client, root, SourceKey::Depegs),
        load_source(&client, root, SourceKey::Composite),
    );

    let snapshot = Snapshot {
        layers,
        supply,
        volume,
        remittance,
        genius,
        wallets,
        reserves,
        tax,
        yield_rates,
        depegs,
        composite,
    };

    info!(
        component = "loader",
        event = "load.finish",
        loaded = snapshot.loaded_count(),
        total = SourceKey::ALL.len()
    );

    snapshot
}

async fn load_source<T: DeserializeOwned>(
    client: &reqwest::Client,
    root: &DataRoot,
    key: SourceKey,
) -> Option<T> {
    match fetch_payload(client, root, key.location()).await {
        Ok(payload) => {
            debug!(
                component = "loader",
                event = "load.source.ok",
                source = key.name()
            );
            Some(payload)
        }
        Err(err) => {
            warn!(
                component = "loader",
                event = "load.source.failed",
                source = key.name(),
                error = %err
            );
            None
        }
    }
}

pub async fn fetch_payload<T: DeserializeOwned>(
    client: &reqwest::Client,
    root: &DataRoot,
    location: &str,
) -> Result<T, FetchError> {
    let bytes = match root {
        DataRoot::Http { .. } => fetch_http(client, &root.resolve(location)).await?,
        DataRoot::Directory(dir) => read_file(&dir.join(location)).await?,
    };

    let parse_error = |source: serde_json::Error| FetchError::Parse {
        location: root.resolve(location),
        source,
    };

    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(parse_error)?;
    if !value.is_object() {
        return Err(parse_error(serde::de::Error::custom(
            "expected a JSON object at the top level",
        )));
    }

    serde_json::from_value(value).map_err(parse_error)
}

async fn fetch_http(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| FetchError::Http {
            url: url.to_string(),
            message: err.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| FetchError::Http {
            url: url.to_string(),
            message: err.to_string(),
        })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    tokio::fs::read(path).await.map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })
}
