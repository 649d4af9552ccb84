//! Key data files: one key per line, blank lines ignored.
//!
//! # Examples
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use strbst::keys;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let generated = keys::generate_keys(&mut rng, 3, 15).unwrap();
//!
//! let mut file = Vec::new();
//! keys::write_keys(&mut file, &generated).unwrap();
//!
//! assert_eq!(keys::parse_keys(&file[..]).unwrap(), generated);
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{Error, Result};

/// How many distinct characters a generated key is built from: `[A-Za-z0-9]`.
pub const ALPHABET_SIZE: usize = 62;

/// Reads keys line by line, skipping blank lines. Line endings (`\n` or
/// `\r\n`) are not part of the key.
pub fn parse_keys<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut keys = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            keys.push(line);
        }
    }

    Ok(keys)
}

/// Reads every key in the file at `path`. A file without a single key is an
/// error since there would be nothing to benchmark.
pub fn read_keys(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let keys = parse_keys(BufReader::new(file)).map_err(|e| Error::io(path, e))?;
    if keys.is_empty() {
        return Err(Error::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    let distinct = keys.iter().collect::<HashSet<_>>().len();
    if distinct != keys.len() {
        warn!(
            "{} holds {} duplicate keys; containers will end up with {} entries",
            path.display(),
            keys.len() - distinct,
            distinct
        );
    }
    info!("read {} keys from {}", keys.len(), path.display());

    Ok(keys)
}

/// Generates `count` distinct random keys of exactly `length` alphanumeric
/// characters, in the order they were drawn.
pub fn generate_keys<R>(rng: &mut R, count: usize, length: usize) -> Result<Vec<String>>
where
    R: Rng + ?Sized,
{
    check_capacity(count, length)?;

    let mut seen = HashSet::with_capacity(count);
    let mut keys = Vec::with_capacity(count);
    let mut collisions = 0usize;
    while keys.len() < count {
        let key: String = (0..length)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        if seen.insert(key.clone()) {
            keys.push(key);
        } else {
            collisions += 1;
        }
    }
    debug!("generated {} keys ({} collisions redrawn)", count, collisions);

    Ok(keys)
}

/// Fails when `count` distinct keys can't be built from `length` characters.
pub(crate) fn check_capacity(count: usize, length: usize) -> Result<()> {
    if length == 0 {
        return Err(Error::InvalidConfig("key length must be at least 1".into()));
    }

    // `None` means more combinations than `usize` can count.
    let combinations = u32::try_from(length)
        .ok()
        .and_then(|length| ALPHABET_SIZE.checked_pow(length));
    match combinations {
        Some(max) if count > max => Err(Error::InvalidConfig(format!(
            "only {} distinct keys of length {} exist, {} were requested",
            max, length, count
        ))),
        _ => Ok(()),
    }
}

/// Writes each key on its own line.
pub fn write_keys<W: Write>(mut writer: W, keys: &[String]) -> io::Result<()> {
    for key in keys {
        writeln!(writer, "{}", key)?;
    }
    writer.flush()
}

/// Creates (or truncates) the file at `path` and writes the keys to it.
pub fn write_keys_to(path: &Path, keys: &[String]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    write_keys(BufWriter::new(file), keys).map_err(|e| Error::io(path, e))?;
    info!("wrote {} keys to {}", keys.len(), path.display());
    Ok(())
}
