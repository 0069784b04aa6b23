use celestial_skymap::packer::pack_coords;
use celestial_skymap::packer::token::{decode_datetime, quantize_datetime};
use celestial_skymap::projection::ProjectionTime;
use celestial_skymap::{
    normalize, ConstellationFigures, Error, PackerConfig, RawProjection, SkyCatalog, StarNames,
};
use num_bigint::BigUint;
use std::io::Write;
use tempfile::NamedTempFile;

const FIGURES: &str = "\
Ori 6 0 26727 26311 26311 25930 25930 25336 25336 27989 27989 26727 24436 25930
UMa 6 0 67301 65378 65378 62956 62956 59774 59774 54061 54061 53910 53910 58001
CMa 4 0 32349 33579 33579 34444 32349 30324 34444 33160";

const NAMES: &str = "\
32349 Sirius
24436 Rigel
27989 Betelgeuse
54061 Dubhe
25336 Bellatrix";

const PROJECTION: &str = r#"{
    "latitude": 34.0194736,
    "longitude": -119.0355556,
    "date_iso8601": "2023-12-30T15:55+00:00",
    "constellations": [
        { "code": "Ori", "stars": [
            { "id": 27989, "x": 1200, "y": 900,  "m": 0.45 },
            { "id": 24436, "x": 1300, "y": 1100, "m": 0.18 },
            { "id": 25336, "x": 1250, "y": 880,  "m": 1.64 },
            { "id": 99999, "x": 10,   "y": 10,   "m": 4.0 }
        ] },
        { "code": "Lep", "stars": [
            { "id": 25985, "x": 1100, "y": 1500, "m": 2.58 }
        ] },
        { "code": "UMa", "stars": [
            { "id": 1234, "x": 5, "y": 5, "m": 6.0 }
        ] },
        { "code": "CMa", "stars": [
            { "id": 32349, "x": 1500, "y": 1400, "m": -1.44 },
            { "id": 30324, "x": 1480, "y": 1350, "m": 1.98 }
        ] }
    ]
}"#;

fn catalog() -> SkyCatalog {
    SkyCatalog::new(
        ConstellationFigures::parse(FIGURES).unwrap(),
        StarNames::parse(NAMES),
    )
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// --- Normalization ---

#[test]
fn normalization_drops_orphans_and_unknown_codes() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let sky = normalize(raw, &catalog.figures).unwrap();

    let codes: Vec<&str> = sky.constellations().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["Ori", "CMa"]);
    assert_eq!(sky.star_count(), 5);
    assert!(sky.constellation("Ori").unwrap().star(99999).is_none());
}

#[test]
fn normalized_date_text() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let sky = normalize(raw, &catalog.figures).unwrap();
    assert_eq!(sky.format_date(), "2023-12-30 15:55");
}

#[test]
fn non_ascii_timestamp_is_an_error() {
    let catalog = catalog();
    let mut raw = RawProjection::from_json_str(PROJECTION).unwrap();
    raw.date_iso8601 = "2023-12-30T15:55+0\u{e9}0".to_string();
    assert!(matches!(
        catalog.packer().pack_raw(raw),
        Err(Error::InvalidDate(_))
    ));
}

// --- Packing ---

#[test]
fn token_id_fields() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer().pack_raw(raw).unwrap();

    assert_eq!(packed.token_id.latitude(), 1_240_194_736);
    assert_eq!(packed.token_id.longitude(), 609_644_444);
    assert_eq!(
        decode_datetime(packed.token_id.datetime()).unwrap(),
        ProjectionTime::new(2023, 12, 30, 15, 55).unwrap()
    );
    assert_eq!(packed.token_id.datetime(), 4_219_270_135);
}

#[test]
fn constellation_mask_skips_dropped_constellations() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer().pack_raw(raw).unwrap();
    assert_eq!(packed.constellation_mask, 0b101);
}

#[test]
fn star_edge_mask_reserves_every_catalog_slot() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer().pack_raw(raw).unwrap();

    // Ori bits 0, 1, 5; UMa bits 6..=12 all clear; CMa bits 13, 14
    assert_eq!(catalog.figures.total_star_slots(), 18);
    assert_eq!(packed.star_edge_mask, vec![0x23, 0x60, 0x00]);
    assert_eq!(packed.star_edge_mask_hex(), "0x236000");
}

#[test]
fn star_coords_in_catalog_order() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer().pack_raw(raw).unwrap();

    assert_eq!(
        packed.star_coords,
        vec![
            pack_coords(1300, 1100),
            pack_coords(1250, 880),
            pack_coords(1200, 900),
            pack_coords(1480, 1350),
            pack_coords(1500, 1400),
        ]
    );
}

#[test]
fn named_stars_in_name_catalog_order() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer().pack_raw(raw).unwrap();

    // Sirius, Rigel, Betelgeuse, (Dubhe absent), Bellatrix
    assert_eq!(packed.named_stars_bitmap, BigUint::from(0b10111u32));
    assert_eq!(packed.named_star_indices, vec![4, 0, 2, 1]);
}

#[test]
fn stricter_threshold_drops_fainter_named_stars() {
    let catalog = catalog();
    let config = PackerConfig {
        named_star_max_magnitude: 1.0,
    };
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer_with_config(config).pack_raw(raw).unwrap();

    assert_eq!(packed.named_stars_bitmap, BigUint::from(0b111u32));
    assert_eq!(packed.named_star_indices, vec![4, 0, 2]);
    assert_eq!(packed.star_coords.len(), 5);
}

#[test]
fn packing_is_idempotent() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let sky = normalize(raw, &catalog.figures).unwrap();
    let packer = catalog.packer();

    let first = packer.pack(&sky).unwrap();
    let second = packer.pack(&sky).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn input_order_does_not_change_output() {
    let catalog = catalog();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let mut reversed = raw.clone();
    reversed.constellations.reverse();
    for c in &mut reversed.constellations {
        c.stars.reverse();
    }

    let packer = catalog.packer();
    assert_eq!(
        packer.pack_raw(raw).unwrap(),
        packer.pack_raw(reversed).unwrap()
    );
}

#[test]
fn out_of_range_observer_is_rejected() {
    let catalog = catalog();
    let mut raw = RawProjection::from_json_str(PROJECTION).unwrap();
    raw.latitude = 90.0000001;
    let err = catalog.packer().pack_raw(raw).unwrap_err();
    assert!(matches!(err, Error::LatitudeOutOfRange { .. }));
    assert!(err.to_string().contains("latitude"));
}

#[test]
fn observer_at_south_pole_is_accepted() {
    let catalog = catalog();
    let mut raw = RawProjection::from_json_str(PROJECTION).unwrap();
    raw.latitude = -90.0;
    raw.longitude = 180.0;
    let packed = catalog.packer().pack_raw(raw).unwrap();
    assert_eq!(packed.token_id.latitude(), 0);
    assert_eq!(packed.token_id.longitude(), 3_600_000_000);
}

#[test]
fn empty_sky_packs_to_zeroes() {
    let catalog = catalog();
    let mut raw = RawProjection::from_json_str(PROJECTION).unwrap();
    raw.constellations.clear();
    let packed = catalog.packer().pack_raw(raw).unwrap();

    assert_eq!(packed.constellation_mask, 0);
    assert_eq!(packed.star_edge_mask, vec![0, 0, 0]);
    assert_eq!(packed.named_stars_bitmap, BigUint::default());
    assert!(packed.named_star_indices.is_empty());
    assert!(packed.star_coords.is_empty());
}

#[test]
fn empty_catalog_gives_empty_edge_mask() {
    let catalog = SkyCatalog::default();
    let raw = RawProjection::from_json_str(PROJECTION).unwrap();
    let packed = catalog.packer().pack_raw(raw).unwrap();
    assert!(packed.star_edge_mask.is_empty());
    assert_eq!(packed.star_edge_mask_hex(), "0x");
    assert_eq!(packed.constellation_mask, 0);
}

#[test]
fn batch_matches_sequential() {
    let catalog = catalog();
    let base = RawProjection::from_json_str(PROJECTION).unwrap();

    let projections: Vec<_> = (0..16)
        .map(|i| {
            let mut raw = base.clone();
            raw.latitude = -80.0 + i as f64 * 10.0;
            normalize(raw, &catalog.figures).unwrap()
        })
        .collect();

    let packer = catalog.packer();
    let batch = packer.pack_batch(&projections);
    assert_eq!(batch.len(), projections.len());
    for (sky, result) in projections.iter().zip(batch) {
        match result {
            Ok(packed) => assert_eq!(packed, packer.pack(sky).unwrap()),
            Err(err) => {
                assert!(sky.latitude() > 90.0, "unexpected failure: {}", err);
            }
        }
    }
}

#[test]
fn catalog_loads_from_files() {
    let figures = write_temp(FIGURES);
    let names = write_temp(NAMES);
    let catalog = SkyCatalog::load(figures.path(), names.path()).unwrap();

    assert_eq!(catalog.figures.codes(), &["Ori", "UMa", "CMa"]);
    assert_eq!(catalog.names.name(24436), Some("Rigel"));
    assert_eq!(catalog.figures.find_pair("CMa", 30324), Some(32349));
}

#[test]
fn projection_loads_from_file() {
    let file = write_temp(PROJECTION);
    let raw = RawProjection::from_file(file.path()).unwrap();
    assert_eq!(raw.constellations.len(), 4);
}

#[test]
fn bce_projection_round_trips_date() {
    let catalog = catalog();
    let mut raw = RawProjection::from_json_str(PROJECTION).unwrap();
    raw.date_iso8601 = "-000500-06-15T22:10:00.000Z".to_string();
    let sky = normalize(raw, &catalog.figures).unwrap();
    assert_eq!(sky.format_date(), "-00-000500-06-15 22:10");

    let packed = catalog.packer().pack(&sky).unwrap();
    assert_eq!(packed.token_id.datetime(), quantize_datetime(sky.time()).unwrap());
    assert_eq!(packed.token_id.datetime() >> 20, 1500);
}
