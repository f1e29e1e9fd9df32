#![cfg(all(feature = "png", feature = "jpeg"))]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use padframe::{BatchOrchestrator, Config, PadError, Status};

fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(dir.join(name))
        .unwrap();
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn run(input: &Path, output: &Path) -> Result<padframe::BatchResult, PadError> {
    BatchOrchestrator::new(Config::new(input, output))?.run()
}

#[test]
fn test_corrupt_file_does_not_stop_batch() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir(&input).unwrap();
    for (i, name) in ["a.png", "b.png", "c.png", "d.png", "e.png"].iter().enumerate() {
        write_png(&input, name, 400 + 100 * i as u32, 500, [40, 80, 120]);
    }
    fs::write(input.join("broken.jpg"), b"definitely not a jpeg").unwrap();

    let result = run(&input, &output).unwrap();

    assert_eq!(result.count(Status::Success), 5);
    assert_eq!(result.count(Status::Failed), 1);
    assert!(result.get("broken.jpg").unwrap().error.is_some());
    assert_eq!(
        file_names(&output),
        ["a.png", "b.png", "c.png", "d.png", "e.png"]
    );
}

#[test]
fn test_outputs_share_one_canvas() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir(&input).unwrap();
    write_png(&input, "small.png", 300, 500, [10, 200, 10]);
    write_png(&input, "wide.png", 2000, 1000, [200, 10, 10]);

    run(&input, &output).unwrap();

    let small = image::open(output.join("small.png")).unwrap().to_rgb8();
    let wide = image::open(output.join("wide.png")).unwrap().to_rgb8();
    assert_eq!(small.dimensions(), (1080, 1350));
    assert_eq!(wide.dimensions(), (1080, 1350));

    // 300x500 is pasted as is at (390, 425)
    assert_eq!(small.get_pixel(390, 425), &Rgb([10, 200, 10]));
    assert_eq!(small.get_pixel(689, 924), &Rgb([10, 200, 10]));
    // 2000x1000 is scaled to 1080x540 at (0, 405)
    let center = wide.get_pixel(540, 675);
    assert!(center.0[0].abs_diff(200) <= 2, "{center:?}");
}

#[test]
fn test_stale_output_is_removed() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    fs::write(output.join("old.png"), b"from a previous run").unwrap();
    write_png(&input, "new.png", 500, 500, [1, 2, 3]);

    run(&input, &output).unwrap();

    assert_eq!(file_names(&output), ["new.png"]);
}

#[test]
fn test_runs_are_byte_identical() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    fs::create_dir(&input).unwrap();
    let gradient = RgbImage::from_fn(640, 480, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    });
    gradient.save(input.join("gradient.png")).unwrap();
    gradient.save(input.join("gradient.jpg")).unwrap();

    let first = root.path().join("first");
    let second = root.path().join("second");
    run(&input, &first).unwrap();
    run(&input, &second).unwrap();

    for name in ["gradient.png", "gradient.jpg"] {
        assert_eq!(
            fs::read(first.join(name)).unwrap(),
            fs::read(second.join(name)).unwrap(),
            "{name}"
        );
    }
}

#[test]
fn test_empty_batch_leaves_output_untouched() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::create_dir(&output).unwrap();
    fs::write(output.join("keep.png"), b"previous").unwrap();
    fs::write(input.join("notes.txt"), b"hello").unwrap();
    fs::write(input.join("broken.png"), b"garbage").unwrap();

    let result = run(&input, &output);

    assert!(matches!(result, Err(PadError::EmptyBatch)));
    assert_eq!(file_names(&output), ["keep.png"]);
}

#[test]
fn test_non_images_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::create_dir(input.join("nested.png")).unwrap();
    fs::write(input.join("notes.txt"), b"hello").unwrap();
    write_png(&input, "UPPER.PNG", 400, 400, [9, 9, 9]);

    let result = run(&input, &output).unwrap();

    assert_eq!(result.get("notes.txt").unwrap().status, Status::Skipped);
    assert_eq!(result.get("nested.png").unwrap().status, Status::Skipped);
    assert_eq!(result.get("UPPER.PNG").unwrap().status, Status::Success);
    assert_eq!(file_names(&output), ["UPPER.PNG"]);
}

#[test]
fn test_invalid_configuration_fails_before_writing() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    fs::create_dir(&input).unwrap();
    write_png(&input, "a.png", 400, 400, [9, 9, 9]);

    let mut config = Config::new(&input, root.path().join("out"));
    config.options.size_threshold = 0;
    assert!(matches!(
        BatchOrchestrator::new(config),
        Err(PadError::InvalidConfiguration(_))
    ));
    assert!(!root.path().join("out").exists());
}
