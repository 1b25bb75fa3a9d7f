//! End-to-end tests for the attribute surface.
//!
//! Each test builds a scratch dataset in a temp directory, drives it through
//! the real netCDF library and checks what comes back out.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use stratus::{AttrValue, NcError, NcType};

fn scratch(name: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}

#[test]
fn scalar_round_trip_for_every_atomic_type() {
    let (_dir, path) = scratch("scalars.nc");
    let values = [
        ("a_byte", AttrValue::Byte(-42)),
        ("a_ubyte", AttrValue::Ubyte(200)),
        ("a_short", AttrValue::Short(-1234)),
        ("a_ushort", AttrValue::Ushort(54321)),
        ("an_int", AttrValue::Int(-100_000)),
        ("a_uint", AttrValue::Uint(3_000_000_000)),
        ("an_int64", AttrValue::Int64(-5_000_000_000)),
        ("a_uint64", AttrValue::Uint64(10_000_000_000)),
        ("a_float", AttrValue::Float(0.25)),
        ("a_double", AttrValue::Double(-1.5e300)),
        ("a_text", AttrValue::Text("degrees_north".into())),
    ];

    let mut file = stratus::create(&path).unwrap();
    for (name, value) in &values {
        file.put_attribute(name, value.clone()).unwrap();
    }
    drop(file);

    let file = stratus::open(&path).unwrap();
    for (name, value) in &values {
        let attr = file.attribute(name).unwrap();
        assert_eq!(&attr.value().unwrap(), value, "attribute {name}");
    }
}

#[test]
fn sixty_four_bit_integers_keep_full_width() {
    let (_dir, path) = scratch("wide.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("min_i64", AttrValue::Int64(i64::MIN))
        .unwrap();
    file.put_attribute("max_u64", AttrValue::Uint64(u64::MAX))
        .unwrap();
    drop(file);

    let file = stratus::open(&path).unwrap();
    assert_eq!(
        file.attribute("min_i64").unwrap().value().unwrap(),
        AttrValue::Int64(i64::MIN)
    );
    assert_eq!(
        file.attribute("max_u64").unwrap().value().unwrap(),
        AttrValue::Uint64(u64::MAX)
    );
}

#[test]
fn arrays_keep_element_count_and_type() {
    let (_dir, path) = scratch("arrays.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("valid_range", AttrValue::Ints(vec![0, 100]))
        .unwrap();
    file.put_attribute("levels", AttrValue::Doubles(vec![1000.0, 850.0, 500.0]))
        .unwrap();

    let attr = file.attribute("valid_range").unwrap();
    assert_eq!(attr.nc_type(), NcType::Int);
    assert_eq!(attr.len().unwrap(), 2);
    assert_eq!(attr.value().unwrap(), AttrValue::Ints(vec![0, 100]));

    let attr = file.attribute("levels").unwrap();
    let value = attr.value().unwrap();
    assert!(!value.is_scalar());
    assert_eq!(value.len(), 3);
    assert_eq!(value.nc_type().size(), 8);
    assert_eq!(value, AttrValue::Doubles(vec![1000.0, 850.0, 500.0]));
}

#[test]
fn length_one_reads_collapse_to_scalars() {
    let (_dir, path) = scratch("single.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("one", AttrValue::Floats(vec![2.5]))
        .unwrap();

    // written as a one-element array, read back as the scalar variant
    let value = file.attribute("one").unwrap().value().unwrap();
    assert!(value.is_scalar());
    assert_eq!(value, AttrValue::Float(2.5));
}

#[test]
fn text_is_always_a_single_value() {
    let (_dir, path) = scratch("text.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("history", AttrValue::Text("created by stratus tests".into()))
        .unwrap();
    file.put_attribute("empty", AttrValue::Text(String::new()))
        .unwrap();
    drop(file);

    let file = stratus::open(&path).unwrap();
    let attr = file.attribute("history").unwrap();
    assert_eq!(attr.nc_type(), NcType::Char);
    assert_eq!(attr.len().unwrap(), "created by stratus tests".len());
    let value = attr.value().unwrap();
    assert!(value.is_scalar());
    assert_eq!(value, AttrValue::Text("created by stratus tests".into()));

    assert_eq!(
        file.attribute("empty").unwrap().value().unwrap(),
        AttrValue::Text(String::new())
    );
}

#[test]
fn rename_readdresses_the_attribute() {
    let (_dir, path) = scratch("rename.nc");
    let mut file = stratus::create(&path).unwrap();
    let mut attr = file.put_attribute("units", AttrValue::Text("K".into())).unwrap();

    attr.set_name("unit_string").unwrap();
    assert_eq!(attr.name(), "unit_string");
    assert_eq!(attr.value().unwrap(), AttrValue::Text("K".into()));

    // the new name resolves, the old one no longer does
    assert_eq!(
        file.attribute("unit_string").unwrap().value().unwrap(),
        AttrValue::Text("K".into())
    );
    assert!(matches!(
        file.attribute("units"),
        Err(NcError::Netcdf { .. })
    ));
}

#[test]
fn failed_rename_leaves_cached_name_unchanged() {
    let (_dir, path) = scratch("rename_ro.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("units", AttrValue::Text("K".into())).unwrap();
    drop(file);

    let file = stratus::open(&path).unwrap();
    let mut attr = file.attribute("units").unwrap();
    assert!(attr.set_name("renamed").is_err());
    assert_eq!(attr.name(), "units");
    assert_eq!(attr.value().unwrap(), AttrValue::Text("K".into()));
}

#[test]
fn delete_then_read_reports_failure() {
    let (_dir, path) = scratch("delete.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("doomed", AttrValue::Int(7)).unwrap();

    let survivor = file.attribute("doomed").unwrap();
    let handle = survivor.clone();
    handle.delete().unwrap();

    // no stale cached data: the surviving handle hits the library and fails
    assert!(matches!(survivor.value(), Err(NcError::Netcdf { .. })));
    assert!(matches!(file.attribute("doomed"), Err(NcError::Netcdf { .. })));
}

#[test]
fn overwrite_redeclares_the_type() {
    let (_dir, path) = scratch("retype.nc");
    let mut file = stratus::create(&path).unwrap();
    let mut attr = file.put_attribute("flexible", AttrValue::Int(1)).unwrap();
    assert_eq!(attr.nc_type(), NcType::Int);

    attr.set_value(AttrValue::Text("now text".into())).unwrap();
    assert_eq!(attr.nc_type(), NcType::Char);
    assert_eq!(attr.value().unwrap(), AttrValue::Text("now text".into()));
}

#[test]
fn variable_attributes_round_trip() {
    let (_dir, path) = scratch("vars.nc");
    let mut file = stratus::create(&path).unwrap();
    file.add_dimension("x", 4).unwrap();
    file.add_dimension("y", 2).unwrap();
    let mut var = file
        .add_variable("temperature", NcType::Float, &["x", "y"])
        .unwrap();
    var.put_attribute("units", AttrValue::Text("K".into())).unwrap();
    var.put_attribute("scale_factor", AttrValue::Double(0.01))
        .unwrap();
    drop(file);

    let file = stratus::open(&path).unwrap();
    let var = file.variable("temperature").unwrap();
    assert_eq!(var.nctype, NcType::Float);
    assert_eq!(
        var.attribute("units").unwrap().value().unwrap(),
        AttrValue::Text("K".into())
    );
    assert_eq!(
        var.attribute("scale_factor").unwrap().value().unwrap(),
        AttrValue::Double(0.01)
    );

    let names: Vec<_> = var
        .attributes()
        .unwrap()
        .iter()
        .map(|a| a.name().to_string())
        .collect();
    assert_eq!(names, vec!["units", "scale_factor"]);
}

#[test]
fn concurrent_reads_and_rewrites_stay_in_bounds() {
    let (_dir, path) = scratch("race.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("levels", AttrValue::Doubles(vec![0.0; 2]))
        .unwrap();
    let attr = file.attribute("levels").unwrap();

    // a reader sizing its buffer from a stale length while a writer grows
    // the attribute must never happen; every read sees one of the two
    // lengths actually written
    std::thread::scope(|s| {
        let reader_attr = attr.clone();
        let reader = s.spawn(move || {
            for _ in 0..200 {
                let value = reader_attr.value().unwrap();
                assert!(matches!(value.len(), 2 | 100), "read {} elements", value.len());
            }
        });
        let mut writer_attr = attr.clone();
        let writer = s.spawn(move || {
            for i in 0..200 {
                let len = if i % 2 == 0 { 100 } else { 2 };
                writer_attr
                    .set_value(AttrValue::Doubles(vec![1.0; len]))
                    .unwrap();
            }
        });
        reader.join().unwrap();
        writer.join().unwrap();
    });
}

#[test]
fn enumeration_lists_all_global_attributes() {
    let (_dir, path) = scratch("listing.nc");
    let mut file = stratus::create(&path).unwrap();
    file.put_attribute("title", AttrValue::Text("test".into())).unwrap();
    file.put_attribute("version", AttrValue::Int(3)).unwrap();

    let attrs = file.attributes().unwrap();
    let names: Vec<_> = attrs.iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, vec!["title", "version"]);
}

#[test]
fn dataset_reports_path_and_dimension_count() {
    let (_dir, path) = scratch("dims.nc");
    let mut file = stratus::create(&path).unwrap();
    assert_eq!(file.path(), path);
    assert_eq!(file.num_dimensions().unwrap(), 0);

    file.add_dimension("x", 4).unwrap();
    file.add_dimension("y", 2).unwrap();
    assert_eq!(file.num_dimensions().unwrap(), 2);
    assert_eq!(file.dimension("y").unwrap().len, 2);
}

#[test]
fn writes_to_a_readonly_dataset_fail() {
    let (_dir, path) = scratch("readonly.nc");
    let file = stratus::create(&path).unwrap();
    drop(file);

    let mut file = stratus::open(&path).unwrap();
    assert!(matches!(
        file.put_attribute("nope", AttrValue::Int(1)),
        Err(NcError::Netcdf { .. })
    ));

    // reopening read-write allows the same write
    drop(file);
    let mut file = stratus::append(&path).unwrap();
    file.put_attribute("yes", AttrValue::Int(1)).unwrap();
    assert_eq!(
        file.attribute("yes").unwrap().value().unwrap(),
        AttrValue::Int(1)
    );
}

#[test]
fn missing_file_reports_the_library_error() {
    let (_dir, path) = scratch("does_not_exist.nc");
    match stratus::open(&path) {
        Err(NcError::Netcdf { code, message }) => {
            assert_ne!(code, 0);
            assert!(!message.is_empty());
        }
        other => panic!("expected a netCDF error, got {other:?}"),
    }
}

#[test]
fn display_is_a_fixed_tag() {
    let (_dir, path) = scratch("display.nc");
    let mut file = stratus::create(&path).unwrap();
    let attr = file.put_attribute("tagged", AttrValue::Int(1)).unwrap();
    assert_eq!(attr.to_string(), "[object Attribute]");
}
