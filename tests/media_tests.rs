use chrono::NaiveDate;
use driverlog::core::media::{store_upload, store_uploads};
use driverlog::core::mileage::MileageLogic;
use driverlog::core::profile::ProfileLogic;
use driverlog::db::mileage::latest_mileage;
use driverlog::db::profiles::find_driver_profile;
use driverlog::errors::AppError;
use driverlog::models::job_run::MonthSpec;
use driverlog::models::mileage::MileageImage;
use driverlog::models::profile::{DriverImage, DriverProfileUpdate};
use driverlog::models::role::Role;
use std::env;
use std::fs;
use std::path::Path;

mod common;
use common::{create_user, open_test_db, temp_image};

fn media_root(name: &str) -> std::path::PathBuf {
    let root = env::temp_dir().join(format!("{}_media_root", name));
    fs::remove_dir_all(&root).ok();
    root
}

/// Regular files anywhere below `dir`.
fn stored_files(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .map(|e| e.unwrap().path())
        .map(|p| if p.is_dir() { stored_files(&p) } else { 1 })
        .sum()
}

#[test]
fn test_store_upload_copies_file() {
    let root = media_root("media_store");
    let source = temp_image("media_store");

    let relative = store_upload(&root, "vehicle_images/front", &source).unwrap();
    assert!(relative.starts_with("vehicle_images/front/"));
    assert!(relative.ends_with(".jpg"));
    assert_eq!(fs::read(root.join(&relative)).unwrap(), fs::read(&source).unwrap());

    let other = store_upload(&root, "vehicle_images/front", &source).unwrap();
    assert_ne!(relative, other);
}

#[test]
fn test_store_upload_missing_source() {
    let root = media_root("media_missing");
    let err = store_upload(&root, "driver_info", &root.join("nope.png")).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_parse_mile() {
    assert_eq!(MileageLogic::parse_mile(" 42 ").unwrap(), 42);
    assert_eq!(MileageLogic::parse_mile("0").unwrap(), 0);
    assert!(MileageLogic::parse_mile("-1").is_err());
    assert!(MileageLogic::parse_mile("12.5").is_err());
    assert!(MileageLogic::parse_mile("").is_err());
}

#[test]
fn test_mileage_add_and_list() {
    let mut pool = open_test_db("media_mileage");
    let root = media_root("media_mileage");
    let user = create_user(&mut pool, "somchai", Some(Role::Driver));
    let photo = temp_image("media_mileage");

    let jan = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    MileageLogic::add(&pool.conn, &root, user.id, 1000, &[(MileageImage::Mile, photo.clone())], jan).unwrap();
    MileageLogic::add(&pool.conn, &root, user.id, 1200, &[], feb).unwrap();

    let all = MileageLogic::list(&pool.conn, user.id, None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].mile, 1000);
    assert!(all[0].mile_image.as_deref().unwrap().starts_with("mileage_images/"));
    assert_eq!(all[1].mile_image, None);

    let only_feb = MileageLogic::list(&pool.conn, user.id, Some(MonthSpec::new(2024, 2).unwrap())).unwrap();
    assert_eq!(only_feb.len(), 1);
    assert_eq!(only_feb[0].mile, 1200);

    let profile = find_driver_profile(&pool.conn, user.id).unwrap().unwrap();
    assert_eq!(latest_mileage(&pool.conn, profile.id).unwrap().unwrap().mile, 1200);
    assert_eq!(all[1].label(Some("1AB 1234")), "1AB 1234 - 2024-02-01");
}

#[test]
fn test_mileage_requires_driver_profile() {
    let mut pool = open_test_db("media_no_profile");
    let root = media_root("media_no_profile");
    let user = create_user(&mut pool, "malee", Some(Role::Operator));
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    assert!(MileageLogic::add(&pool.conn, &root, user.id, 10, &[], today).is_err());
    assert!(MileageLogic::list(&pool.conn, user.id, None).unwrap().is_empty());
}

#[test]
fn test_store_uploads_is_all_or_nothing() {
    let root = media_root("media_batch");
    let photo = temp_image("media_batch");
    let uploads = [
        (MileageImage::Mile, photo.clone()),
        (MileageImage::Front, photo.clone()),
        (MileageImage::Back, root.join("missing.jpg")),
    ];

    let err = store_uploads(&root, &uploads, |slot| slot.upload_to()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(stored_files(&root), 0);

    let stored = store_uploads(&root, &uploads[..2], |slot| slot.upload_to()).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored_files(&root), 2);
}

#[test]
fn test_failed_mileage_insert_removes_photos() {
    let mut pool = open_test_db("media_insert_failure");
    let root = media_root("media_insert_failure");
    let user = create_user(&mut pool, "somchai", Some(Role::Driver));
    let photo = temp_image("media_insert_failure");
    pool.conn
        .execute_batch(
            "CREATE TRIGGER reject_mileage BEFORE INSERT ON mileage
             BEGIN SELECT RAISE(ABORT, 'store unavailable'); END;",
        )
        .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let images = [(MileageImage::Mile, photo.clone()), (MileageImage::Left, photo)];
    let err = MileageLogic::add(&pool.conn, &root, user.id, 500, &images, today).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(stored_files(&root), 0);
}

#[test]
fn test_failed_profile_update_removes_images() {
    let mut pool = open_test_db("media_profile_failure");
    let root = media_root("media_profile_failure");
    let user = create_user(&mut pool, "somchai", Some(Role::Driver));
    let photo = temp_image("media_profile_failure");
    pool.conn
        .execute_batch(
            "CREATE TRIGGER reject_profile_edit BEFORE UPDATE ON driver_profiles
             BEGIN SELECT RAISE(ABORT, 'store unavailable'); END;",
        )
        .unwrap();

    let upd = DriverProfileUpdate {
        phone_number: Some("0812345678".to_string()),
        ..Default::default()
    };
    let images = [
        (DriverImage::IdCard, photo.clone()),
        (DriverImage::ProfilePhoto, photo),
    ];
    let err = ProfileLogic::update_driver(&mut pool.conn, &root, user.id, &upd, &images).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
    assert_eq!(stored_files(&root), 0);

    let profile = find_driver_profile(&pool.conn, user.id).unwrap().unwrap();
    assert_eq!(profile.phone_number, None);
    assert_eq!(profile.id_card_image, None);
}
