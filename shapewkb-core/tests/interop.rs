mod support;

use geozero::{CoordDimensions, ToJson, ToWkb, ToWkt};
use shapewkb_core::interop::to_geo;
use shapewkb_core::{decode_element, decode_structure, Geometry, GeometryType, ImportFlags};
use support::{WkbBuilder, CCW_SQUARE, CW_HOLE, CW_SQUARE};

fn decode(blob: &[u8]) -> Geometry {
    decode_element(blob, GeometryType::Unknown, ImportFlags::DEFAULT)
        .unwrap()
        .0
}

/// Decoding what we export yields the same geometry.
fn assert_wkb_round_trip(geom: &Geometry) {
    assert_wkb_round_trip_with(geom, CoordDimensions::xy());
}

fn assert_wkb_round_trip_with(geom: &Geometry, dims: CoordDimensions) {
    let blob = geom.to_wkb(dims).unwrap();
    assert_eq!(&decode(&blob), geom);
}

fn xym() -> CoordDimensions {
    let mut dims = CoordDimensions::xy();
    dims.m = true;
    dims
}

/// Interleave per-vertex Z and/or M values into an XY ring.
fn with_attributes(xy: &[f64], zs: Option<&[f64]>, ms: Option<&[f64]>) -> Vec<f64> {
    xy.chunks(2)
        .enumerate()
        .flat_map(|(i, v)| {
            let mut tuple = v.to_vec();
            tuple.extend(zs.map(|zs| zs[i]));
            tuple.extend(ms.map(|ms| ms[i]));
            tuple
        })
        .collect()
}

#[test]
fn polygon_wkt_restores_closing_vertex() {
    let geom = decode(&WkbBuilder::le().polygon(3, 2, &[CCW_SQUARE]).build());
    let wkt = geom.to_wkt().unwrap();
    assert_eq!(wkt, "POLYGON((0 0,0 10,10 10,10 0,0 0))");
}

#[test]
fn polygon_geojson_is_well_formed() {
    let geom = decode(&WkbBuilder::le().polygon(3, 2, &[CW_SQUARE, CW_HOLE]).build());
    let json: serde_json::Value = serde_json::from_str(&geom.to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "Polygon");
    let rings = json["coordinates"].as_array().unwrap();
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0].as_array().unwrap().len(), 5);
    assert_eq!(rings[1].as_array().unwrap().len(), 5);
}

#[test]
fn decoded_geometries_survive_wkb_round_trip() {
    let far: Vec<f64> = CW_SQUARE.iter().map(|v| v - 50.0).collect();
    let blobs = [
        WkbBuilder::le().point(1, &[1.0, 2.0]).build(),
        WkbBuilder::le()
            .header(4)
            .u32(2)
            .point(1, &[1.0, 2.0])
            .point(1, &[3.0, 4.0])
            .build(),
        WkbBuilder::le().line_string(2, 2, &[5.0, 5.0]).build(),
        WkbBuilder::be()
            .header(5)
            .u32(2)
            .line_string(2, 2, &[0.0, 0.0, 1.0, 1.0])
            .line_string(2, 2, &[2.0, 2.0, 3.0, 3.0, 2.0, 2.0])
            .build(),
        WkbBuilder::le().polygon(3, 2, &[CCW_SQUARE, CW_HOLE]).build(),
        WkbBuilder::le()
            .header(6)
            .u32(2)
            .polygon(3, 2, &[CW_SQUARE])
            .polygon(3, 2, &[&far])
            .build(),
    ];
    for blob in &blobs {
        assert_wkb_round_trip(&decode(blob));
    }
}

#[test]
fn to_geo_builds_polygon_with_interior() {
    let geom = decode(&WkbBuilder::le().polygon(3, 2, &[CW_SQUARE, CW_HOLE]).build());
    match to_geo(&geom).unwrap() {
        geo::Geometry::Polygon(p) => {
            assert_eq!(p.exterior().0.len(), 5);
            assert_eq!(p.interiors().len(), 1);
        }
        other => panic!("expected Polygon, got {other:?}"),
    }
}

#[test]
fn to_geo_keeps_multipolygon_shape() {
    let far: Vec<f64> = CW_SQUARE.iter().map(|v| v + 20.0).collect();
    let geom = decode(
        &WkbBuilder::le()
            .header(6)
            .u32(2)
            .polygon(3, 2, &[CW_SQUARE])
            .polygon(3, 2, &[&far])
            .build(),
    );
    match to_geo(&geom).unwrap() {
        geo::Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
        other => panic!("expected MultiPolygon, got {other:?}"),
    }
}

#[test]
fn structure_exports_as_geometry_collection() {
    let blob = WkbBuilder::le()
        .header(7)
        .u32(2)
        .point(1, &[1.0, 2.0])
        .header(7)
        .u32(1)
        .line_string(2, 2, &[0.0, 0.0, 3.0, 4.0])
        .build();
    let (tree, _) = decode_structure(&blob, ImportFlags::DEFAULT).unwrap();
    let wkt = tree.to_wkt().unwrap();
    assert!(wkt.starts_with("GEOMETRYCOLLECTION("), "got: {wkt}");
    assert!(wkt.contains("POINT(1 2)"), "got: {wkt}");
    assert!(wkt.contains("LINESTRING(0 0,3 4)"), "got: {wkt}");
}

#[test]
fn z_polygon_survives_wkb_round_trip() {
    let zs = [1.0, 2.0, 3.0, 4.0, 1.0];
    let ring = with_attributes(CCW_SQUARE, Some(&zs[..]), None);
    let geom = decode(&WkbBuilder::le().polygon(1003, 3, &[&ring]).build());
    assert!(geom.as_multi_path().unwrap().z_values().is_some());
    assert_wkb_round_trip_with(&geom, CoordDimensions::xyz());
}

#[test]
fn measured_line_with_nan_measures_survives_wkb_round_trip() {
    let line = [0.0, 0.0, f64::NAN, 1.0, 1.0, 2.0, 2.0, 0.0, f64::NAN];
    let geom = decode(&WkbBuilder::le().line_string(2002, 3, &line).build());
    let path = geom.as_multi_path().unwrap();
    assert_eq!(path.m(1), Some(2.0));
    assert!(path.m(2).is_some_and(f64::is_nan));
    assert_wkb_round_trip_with(&geom, xym());
}

#[test]
fn normalized_zm_polygon_decodes_unchanged() {
    let zs = [1.0, 2.0, 3.0, 4.0, 1.0];
    let ms = [10.0, f64::NAN, 30.0, 40.0, 10.0];
    let ring = with_attributes(CW_SQUARE, Some(&zs[..]), Some(&ms[..]));
    let geom = decode(&WkbBuilder::le().polygon(3003, 4, &[&ring]).build());

    let path = geom.as_multi_path().unwrap();
    assert_eq!(path.position(), &CW_SQUARE[..8]);
    assert_eq!(path.z_values(), Some(&zs[..4]));
    let decoded_ms = path.m_values().unwrap();
    assert_eq!(decoded_ms.len(), 4);
    assert_eq!(decoded_ms[0], 10.0);
    assert!(decoded_ms[1].is_nan());
    assert_eq!(&decoded_ms[2..], &ms[2..4]);

    assert_wkb_round_trip_with(&geom, CoordDimensions::xyzm());
}
