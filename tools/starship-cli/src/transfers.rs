//! Append-only JSON log of submitted transfers.

use std::{
    fs::{self, File},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// One submitted `send`, as written to the log.
pub struct TransferRecord<'a> {
    pub network: &'a str,
    pub tx_hash: String,
    pub dst_eid: u32,
    pub token_id: String,
    pub player_id: u8,
    pub composer: String,
    pub refund_address: String,
    pub native_fee: String,
    pub alternate_token_fee: String,
}

pub fn append_transfer(path: &Path, record: &TransferRecord<'_>) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let mut root = match fs::read_to_string(path) {
        Ok(raw) if !raw.trim().is_empty() => serde_json::from_str::<Value>(&raw)
            .with_context(|| format!("{} is not a transfers log", path.display()))?,
        Ok(_) => json!({}),
        Err(e) if e.kind() == ErrorKind::NotFound => json!({}),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    if !root.is_object() {
        root = json!({});
    }
    root["updated_at"] = json!(now);

    if root.get("transfers").and_then(Value::as_array).is_none() {
        root["transfers"] = json!([]);
    }

    let entry = json!({
        "network": record.network,
        "tx_hash": record.tx_hash,
        "dst_eid": record.dst_eid,
        "token_id": record.token_id,
        "player_id": record.player_id,
        "composer": record.composer,
        "refund_address": record.refund_address,
        "native_fee": record.native_fee,
        "alternate_token_fee": record.alternate_token_fee,
        "submitted_at": now,
    });
    if let Some(transfers) = root["transfers"].as_array_mut() {
        transfers.push(entry);
    }

    replace_log(path, &root)
}

/// Sibling file the next log is written to before it replaces `path`.
fn staged_path(path: &Path) -> PathBuf {
    path.with_extension("json.partial")
}

/// Swap in `root` as the whole log. Readers see either the old log or the new one.
fn replace_log(path: &Path, root: &Value) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let staged = staged_path(path);
    let mut file =
        File::create(&staged).with_context(|| format!("creating {}", staged.display()))?;
    serde_json::to_writer_pretty(&mut file, root).context("serialising transfers log")?;
    file.sync_all().with_context(|| format!("flushing {}", staged.display()))?;
    drop(file);

    fs::rename(&staged, path).with_context(|| format!("replacing {}", path.display()))
}
