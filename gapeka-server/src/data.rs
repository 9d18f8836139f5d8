//! Input data files: timetable, station reference, rail geometry.
//!
//! The on-disk formats keep the field names of the published GAPEKA data
//! set (`nomor_ka`, `jadwal_perhentian`, ...); the loaders convert them
//! into domain types. Failures here are fatal to the calling run, unlike
//! the segment-local skips inside precomputation and estimation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{Coord, StationCode, Stop, TrainSchedule};
use crate::graph::RailElement;

/// Fatal error while reading a required input file.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The data directory layout shared by the precompute pass and the server.
#[derive(Debug, Clone)]
pub struct DataDir(PathBuf);

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    /// Timetable: all train schedules.
    pub fn schedules(&self) -> PathBuf {
        self.0.join("jadwal_kereta.json")
    }

    /// Station reference: code → coordinate.
    pub fn stations(&self) -> PathBuf {
        self.0.join("stasiun_data.json")
    }

    /// Raw rail geometry (Overpass-style elements).
    pub fn rail_geometry(&self) -> PathBuf {
        self.0.join("jalur_rel_jawa.json")
    }

    /// Precomputed routes, written by the precompute pass.
    pub fn routes(&self) -> PathBuf {
        self.0.join("precomputed-routes.json")
    }
}

/// Station reference table: code → coordinate.
pub type StationIndex = HashMap<StationCode, Coord>;

#[derive(Deserialize)]
struct TrainScheduleDto {
    nomor_ka: String,
    nama_kereta: String,
    #[serde(default)]
    jadwal_perhentian: Vec<StopDto>,
}

#[derive(Deserialize)]
struct StopDto {
    stasiun_perhentian: String,
    #[serde(default)]
    datang: Option<String>,
    #[serde(default)]
    berangkat: Option<String>,
}

#[derive(Deserialize)]
struct StationDto {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RailDataDto {
    elements: Vec<RailElement>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all train schedules from the timetable file.
pub fn load_schedules(path: &Path) -> Result<Vec<TrainSchedule>, DataError> {
    let dtos: Vec<TrainScheduleDto> = read_json(path)?;
    Ok(dtos.into_iter().map(schedule_from_dto).collect())
}

fn schedule_from_dto(dto: TrainScheduleDto) -> TrainSchedule {
    let stops = dto
        .jadwal_perhentian
        .into_iter()
        .map(|s| Stop::from_raw(s.stasiun_perhentian, s.datang.as_deref(), s.berangkat.as_deref()))
        .collect();
    TrainSchedule {
        id: dto.nomor_ka,
        name: dto.nama_kereta,
        stops,
    }
}

/// Load the station reference table.
///
/// Entries whose key is not a valid station code are dropped.
pub fn load_stations(path: &Path) -> Result<StationIndex, DataError> {
    let dtos: HashMap<String, StationDto> = read_json(path)?;
    Ok(dtos
        .into_iter()
        .filter_map(|(code, s)| {
            StationCode::parse(&code)
                .ok()
                .map(|code| (code, Coord::new(s.lat, s.lon)))
        })
        .collect())
}

/// Load the raw rail geometry elements.
pub fn load_rail_elements(path: &Path) -> Result<Vec<RailElement>, DataError> {
    let dto: RailDataDto = read_json(path)?;
    Ok(dto.elements)
}
