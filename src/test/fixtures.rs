use std::{
    io::{Cursor, Read},
    time::{Duration, Instant},
};

use byteorder::{LittleEndian, ReadBytesExt};

use super::{assert_triangulation, polygon_area, reversed};
use crate::triangulate;

struct Record {
    label: String,
    points: Vec<[f64; 2]>,
    triangle_count: usize,
    area: f64,
}

/// Decodes `polygons.bin`: a sequence of records, each introduced by a `1`
/// marker and terminated by a `0`. A record holds a length-prefixed label,
/// a point count followed by `(x, y)` pairs, the expected triangle count and
/// the expected area. All values are little-endian.
fn read_records(bytes: &[u8]) -> std::io::Result<Vec<Record>> {
    let mut cursor = Cursor::new(bytes);
    let mut records = vec![];
    loop {
        let marker = cursor.read_i32::<LittleEndian>()?;
        if marker == 0 {
            break;
        }
        assert_eq!(marker, 1);

        let label_length = cursor.read_i32::<LittleEndian>()? as usize;
        let mut label = vec![0; label_length];
        cursor.read_exact(&mut label)?;

        let point_count = cursor.read_i32::<LittleEndian>()?;
        let mut points = vec![];
        for _ in 0..point_count {
            let x = cursor.read_f64::<LittleEndian>()?;
            let y = cursor.read_f64::<LittleEndian>()?;
            points.push([x, y]);
        }

        let triangle_count = cursor.read_i32::<LittleEndian>()? as usize;
        let area = cursor.read_f64::<LittleEndian>()?;
        records.push(Record {
            label: String::from_utf8_lossy(&label).into_owned(),
            points,
            triangle_count,
            area,
        });
    }
    Ok(records)
}

#[test]
fn test_data() {
    let records = read_records(include_bytes!("./polygons.bin")).unwrap();
    assert!(records.len() > 40);

    let mut time = 0;
    for record in records.iter() {
        assert!(
            (polygon_area(&record.points) - record.area).abs() < 1e-9 * record.area.max(1.),
            "{}",
            record.label
        );

        for points in [record.points.clone(), reversed(&record.points)] {
            let now = Instant::now();
            let indices = triangulate(&points)
                .unwrap_or_else(|err| panic!("{}: {}", record.label, err));
            time += now.elapsed().as_nanos();

            assert_eq!(indices.len() / 3, record.triangle_count, "{}", record.label);
            assert_triangulation(&points, &indices);
        }
    }

    dbg!(Duration::from_nanos(time as u64));
    dbg!(records.len());
}
