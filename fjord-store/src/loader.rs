use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use fjord_catalog::{CatalogError, Dataset};

use crate::app_config::{DataConfig, DataSource};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed JSON bundle {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid dataset: {0}")]
    Catalog(#[from] CatalogError),
}

pub fn load_dataset(config: &DataConfig) -> Result<Dataset, StoreError> {
    match config.source {
        DataSource::CsvDir => load_csv_dir(&config.path),
        DataSource::JsonBundle => load_json_bundle(&config.path),
    }
}

/// Load the collections from `<dir>/<collection>.csv`.
/// `excursions.csv` and `locales.csv` may be absent.
pub fn load_csv_dir(dir: &Path) -> Result<Dataset, StoreError> {
    let dataset = Dataset {
        bookings: read_csv_file(&dir.join("bookings.csv"))?,
        ships: read_csv_file(&dir.join("ships.csv"))?,
        cabins: read_csv_file(&dir.join("cabins.csv"))?,
        ports: read_csv_file(&dir.join("ports.csv"))?,
        voyage_products: read_csv_file(&dir.join("voyage_products.csv"))?,
        excursions: read_optional_csv_file(&dir.join("excursions.csv"))?,
        locales: read_optional_csv_file(&dir.join("locales.csv"))?,
    };
    finish(dataset, dir)
}

pub fn load_json_bundle(path: &Path) -> Result<Dataset, StoreError> {
    let text = read_text(path)?;
    let dataset: Dataset = serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    finish(dataset, path)
}

/// Deserialize rows by header name. Unknown columns are ignored.
pub fn parse_csv<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, csv::Error> {
    let text = text.trim_start_matches('\u{FEFF}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    reader.deserialize().collect()
}

fn finish(dataset: Dataset, origin: &Path) -> Result<Dataset, StoreError> {
    dataset.validate()?;
    info!(
        origin = %origin.display(),
        bookings = dataset.bookings.len(),
        ships = dataset.ships.len(),
        cabins = dataset.cabins.len(),
        ports = dataset.ports.len(),
        voyage_products = dataset.voyage_products.len(),
        excursions = dataset.excursions.len(),
        locales = dataset.locales.len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_csv_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let text = read_text(path)?;
    parse_csv(&text).map_err(|source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_csv_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        info!(path = %path.display(), "Optional collection missing, using empty list");
        return Ok(Vec::new());
    }
    read_csv_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fjord_catalog::{Booking, Port};

    const BOOKINGS: &str = "\u{FEFF}booking_id,status,ship_code,sailing_code,departure_port,arrival_port,cabin_category,flight_out_desc,legacy_column\n\
        B100,Confirmed,NK,NK260920,BGO,KKN,K3,,x\n\
        B200,Cancelled,MS,MS240101,HAM,HAM,K3,DY620,y\n";

    fn write_required(dir: &Path, bookings: &str) {
        fs::write(dir.join("bookings.csv"), bookings).unwrap();
        fs::write(
            dir.join("ships.csv"),
            "brm_code,ship_name,contentful_id,slug,has_contentful_content\nNK,MS Nordkapp,cf1,ms-nordkapp,True\n",
        )
        .unwrap();
        fs::write(
            dir.join("cabins.csv"),
            "ship_brm_code,ship_name,cabin_code,cabin_name\nNK,MS Nordkapp,K3,Polar Inside\n",
        )
        .unwrap();
        fs::write(dir.join("ports.csv"), "port_code,port_name,slug,contentful_id\n,Kirkenes,kirkenes,cf2\n").unwrap();
        fs::write(
            dir.join("voyage_products.csv"),
            "product_code,title,category,contentful_id\nNK-CLASSIC-12,Classic,Coastal,cf3\n",
        )
        .unwrap();
    }

    #[test]
    fn test_parse_csv_handles_bom_and_empty_cells() {
        let bookings: Vec<Booking> = parse_csv(BOOKINGS).unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].booking_id, "B100");
        assert_eq!(bookings[0].flight_out_desc, None);
        assert_eq!(bookings[1].flight_out_desc.as_deref(), Some("DY620"));
        assert!(bookings[0].sailing_description.is_empty());
    }

    #[test]
    fn test_load_csv_dir_without_optional_files() {
        let dir = tempfile::tempdir().unwrap();
        write_required(dir.path(), BOOKINGS);

        let dataset = load_csv_dir(dir.path()).expect("Failed to load dataset");
        assert_eq!(dataset.bookings.len(), 2);
        assert_eq!(dataset.ships[0].slug, "ms-nordkapp");
        assert_eq!(dataset.ports[0], Port {
            port_code: None,
            port_name: "Kirkenes".to_string(),
            slug: "kirkenes".to_string(),
            contentful_id: "cf2".to_string(),
        });
        assert!(dataset.excursions.is_empty());
        assert!(dataset.locales.is_empty());
    }

    #[test]
    fn test_load_csv_dir_rejects_duplicate_booking_ids() {
        let dir = tempfile::tempdir().unwrap();
        write_required(dir.path(), "booking_id,status\nB1,Confirmed\nB1,Cancelled\n");

        match load_csv_dir(dir.path()) {
            Err(StoreError::Catalog(CatalogError::DuplicateBookingId(id))) => assert_eq!(id, "B1"),
            other => panic!("expected duplicate booking error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_required_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_csv_dir(dir.path()), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_load_json_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.json");
        fs::write(
            &path,
            r#"{
                "bookings": [{"booking_id": "B1", "ship_code": "NK", "flight_in_desc": ""}],
                "ships": [{"brm_code": "NK", "ship_name": "MS Nordkapp"}],
                "cabins": [],
                "ports": [{"port_code": "BGO", "port_name": "Bergen"}],
                "voyage_products": []
            }"#,
        )
        .unwrap();

        let config = DataConfig { source: DataSource::JsonBundle, path };
        let dataset = load_dataset(&config).expect("Failed to load bundle");
        assert_eq!(dataset.bookings[0].flight_in_desc, None);
        assert_eq!(dataset.ports[0].port_code.as_deref(), Some("BGO"));
        assert!(dataset.excursions.is_empty());
    }

    #[test]
    fn test_malformed_json_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_json_bundle(&path), Err(StoreError::Json { .. })));
    }
}
