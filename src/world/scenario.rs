//! Scenario loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scenario files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Text is parsed as RON, anything else goes through brotli
//! - Writing: Always uses brotli compression

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Actor, Cuboid, Material, Point3, Size3};

/// Scenario used when no file was chosen
pub const DEFAULT_SCENARIO: &str = include_str!("../../assets/scenarios/default.ron");

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum blocks along any axis
    pub const MAX_DIM: u32 = 512;
    /// Maximum total block count
    pub const MAX_BLOCKS: u64 = 4_000_000;
    /// Maximum number of terrain fills
    pub const MAX_FILLS: usize = 65_536;
    /// Maximum summed volume of all terrain fills
    pub const MAX_FILL_BLOCKS: u64 = 64_000_000;
    /// Maximum number of actors
    pub const MAX_ACTORS: usize = 4096;
    /// Maximum length of scenario and actor names
    pub const MAX_NAME_LEN: usize = 256;
}

/// One cuboid of terrain. `None` carves air.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainFill {
    pub low: Point3,
    pub high: Point3,
    pub material: Option<Material>,
}

impl TerrainFill {
    pub fn cuboid(&self) -> Cuboid {
        Cuboid::new(self.low, self.high)
    }
}

/// On-disk form of a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub size: Size3,
    #[serde(default)]
    pub terrain: Vec<TerrainFill>,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

/// Which scenario a game view loads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    DefaultScenario,
    File(PathBuf),
}

impl LoadTarget {
    /// Resolve an optional explicit path; no path means the default scenario
    pub fn resolve(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => LoadTarget::File(p),
            None => LoadTarget::DefaultScenario,
        }
    }

    /// Read the scenario this target points at.
    ///
    /// `default_override` replaces the built-in default scenario when set.
    pub fn read(&self, default_override: Option<&Path>) -> Result<Scenario, ScenarioError> {
        match (self, default_override) {
            (LoadTarget::File(path), _) => load_scenario(path),
            (LoadTarget::DefaultScenario, Some(path)) => load_scenario(path),
            (LoadTarget::DefaultScenario, None) => load_scenario_from_str(DEFAULT_SCENARIO),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            LoadTarget::File(p) => Some(p),
            LoadTarget::DefaultScenario => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            LoadTarget::DefaultScenario => "default scenario".to_string(),
            LoadTarget::File(p) => p.display().to_string(),
        }
    }
}

/// Error type for scenario loading and saving
#[derive(Debug)]
pub enum ScenarioError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    CompressionError(String),
    ValidationError(String),
}

impl From<std::io::Error> for ScenarioError {
    fn from(e: std::io::Error) -> Self {
        ScenarioError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ScenarioError {
    fn from(e: ron::error::SpannedError) -> Self {
        ScenarioError::ParseError(e)
    }
}

impl From<ron::Error> for ScenarioError {
    fn from(e: ron::Error) -> Self {
        ScenarioError::SerializeError(e)
    }
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::IoError(e) => write!(f, "IO error: {}", e),
            ScenarioError::ParseError(e) => write!(f, "Parse error: {}", e),
            ScenarioError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ScenarioError::CompressionError(e) => write!(f, "Compression error: {}", e),
            ScenarioError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Validate a parsed scenario before it is turned into a world
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ScenarioError> {
    let invalid = |msg: String| Err(ScenarioError::ValidationError(msg));
    let size = scenario.size;

    if scenario.name.len() > limits::MAX_NAME_LEN {
        return invalid(format!("name too long ({} > {})", scenario.name.len(), limits::MAX_NAME_LEN));
    }
    if size.x == 0 || size.y == 0 || size.z == 0 {
        return invalid(format!("empty dimensions {}x{}x{}", size.x, size.y, size.z));
    }
    if size.x > limits::MAX_DIM || size.y > limits::MAX_DIM || size.z > limits::MAX_DIM {
        return invalid(format!("dimension exceeds {}", limits::MAX_DIM));
    }
    if size.volume() > limits::MAX_BLOCKS {
        return invalid(format!("too many blocks ({} > {})", size.volume(), limits::MAX_BLOCKS));
    }
    if scenario.terrain.len() > limits::MAX_FILLS {
        return invalid(format!("too many terrain fills ({} > {})", scenario.terrain.len(), limits::MAX_FILLS));
    }
    if scenario.actors.len() > limits::MAX_ACTORS {
        return invalid(format!("too many actors ({} > {})", scenario.actors.len(), limits::MAX_ACTORS));
    }

    let mut fill_blocks: u64 = 0;
    for (i, fill) in scenario.terrain.iter().enumerate() {
        let cuboid = fill.cuboid();
        if !cuboid.is_ordered() {
            return invalid(format!("terrain[{}]: low corner above high corner", i));
        }
        if !size.contains(fill.high) {
            return invalid(format!("terrain[{}]: extends outside the world", i));
        }
        fill_blocks = fill_blocks.saturating_add(cuboid.volume());
        if fill_blocks > limits::MAX_FILL_BLOCKS {
            return invalid(format!("terrain fills cover too many blocks (> {})", limits::MAX_FILL_BLOCKS));
        }
    }

    for (i, actor) in scenario.actors.iter().enumerate() {
        if actor.name.len() > limits::MAX_NAME_LEN {
            return invalid(format!("actor[{}]: name too long", i));
        }
        if !size.contains(actor.position) {
            return invalid(format!("actor[{}] '{}': outside the world", i, actor.name));
        }
    }

    Ok(())
}

/// Parse scenario bytes (supports both compressed and uncompressed)
pub fn parse_scenario_data(bytes: &[u8]) -> Result<Scenario, ScenarioError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    // Brotli output is almost never valid UTF-8; if it happens to be, the
    // RON parse fails and the bytes get a second chance as brotli
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return load_scenario_from_str(&decompress(bytes)?),
    };
    match load_scenario_from_str(text) {
        Err(ScenarioError::ParseError(e)) => match decompress(bytes) {
            Ok(contents) => load_scenario_from_str(&contents),
            Err(_) => Err(ScenarioError::ParseError(e)),
        },
        result => result,
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

fn decompress(bytes: &[u8]) -> Result<String, ScenarioError> {
    let mut decompressed = Vec::new();
    brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
        .map_err(|e| ScenarioError::CompressionError(format!("brotli decompression failed: {}", e)))?;
    String::from_utf8(decompressed)
        .map_err(|e| ScenarioError::CompressionError(format!("invalid UTF-8 after decompression: {}", e)))
}

/// Load a scenario from a RON string (for the embedded default or testing)
pub fn load_scenario_from_str(s: &str) -> Result<Scenario, ScenarioError> {
    let scenario: Scenario = match ron::from_str(s) {
        Ok(scenario) => scenario,
        Err(e) => {
            let pos = e.position;
            log::warn!("RON parse error at line {}, column {}: {}", pos.line, pos.col, e.code);
            if let Some(line) = s.lines().nth(pos.line.saturating_sub(1)) {
                log::warn!("  Line {}: {}", pos.line, line.trim_end());
            }
            return Err(e.into());
        }
    };
    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Load a scenario file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    parse_scenario_data(&bytes)
}

/// Serialize a scenario to compressed bytes
pub fn serialize_scenario(scenario: &Scenario) -> Result<Vec<u8>, ScenarioError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let ron_string = ron::ser::to_string_pretty(scenario, config)?;

    // Compress with brotli (quality 6, window 22 - good balance of speed/ratio)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(ron_string.as_bytes()), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: 6,
        lgwin: 22,
        ..Default::default()
    })
    .map_err(|e| ScenarioError::CompressionError(format!("brotli compression failed: {}", e)))?;

    Ok(compressed)
}

/// Save a scenario to a compressed RON file (brotli)
pub fn save_scenario<P: AsRef<Path>>(scenario: &Scenario, path: P) -> Result<(), ScenarioError> {
    let path = path.as_ref();
    let bytes = serialize_scenario(scenario)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}
