//! Tests for output naming, PNG export and icon loading

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use iconcloud::CloudError;
    use iconcloud::io::image::{
        export_png, load_icon, output_path, output_timestamp, snapshot_path, visualization_path,
    };
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    // Tests timestamps use the sortable date and time format
    // Verified by using colons between time fields
    #[test]
    fn test_output_timestamp() {
        let moment = Utc
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid date");
        assert_eq!(output_timestamp(&moment), "2024-03-09_14-05-07");
    }

    // Tests output, snapshot and animation paths share one stem
    // Verified by appending the snapshot extension instead of replacing it
    #[test]
    fn test_output_paths() {
        let image = output_path(Path::new("out"), "2024-03-09_14-05-07", 2);
        assert_eq!(
            image,
            Path::new("out/image-cloud_2024-03-09_14-05-07_2.png")
        );
        assert_eq!(
            snapshot_path(&image),
            Path::new("out/image-cloud_2024-03-09_14-05-07_2.json")
        );
        assert_eq!(
            visualization_path(&image),
            Path::new("out/image-cloud_2024-03-09_14-05-07_2.gif")
        );
    }

    // Tests export creates missing directories and the image loads back
    // Verified by skipping create_dir_all
    #[test]
    fn test_export_and_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested/deeper/cloud.png");

        let mut image = RgbaImage::new(4, 3);
        image.put_pixel(1, 2, Rgba([10, 20, 30, 255]));
        export_png(&image, &path).expect("export succeeds");

        let loaded = load_icon(&path).expect("load succeeds");
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(1, 2), &Rgba([10, 20, 30, 255]));
        assert_eq!(loaded.get_pixel(0, 0).0[3], 0);
    }

    // Tests loading a missing icon reports its path
    // Verified by dropping the path context
    #[test]
    fn test_load_missing_icon() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.png");

        match load_icon(&path) {
            Err(CloudError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("expected ImageLoad, got {other:?}"),
        }
    }
}
