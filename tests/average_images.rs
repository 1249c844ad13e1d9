use color_average::{
    average_and_export, average_directory, average_each_image, average_image_file, average_tree,
    read_csv, to_line, to_rectangle, write_csv, AspectRatio, AveragingOptions, CLIParser, Error,
    ImageResult, RasterFormat,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FORMATS: &[RasterFormat] = &[RasterFormat::Jpeg, RasterFormat::Png];

fn create_solid_image(path: &Path, value: u8, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
        .save(path)
        .expect("Saving of test image failed");
}

fn create_test_directory(values: &[u8]) -> TempDir {
    let directory = TempDir::new().expect("Creation of temporary directory failed");
    for value in values {
        create_solid_image(&directory.path().join(format!("{}.png", value)), *value, 200, 200);
    }
    directory
}

fn create_nested_test_directories(values: &[u8], image_count: usize) -> TempDir {
    let root = TempDir::new().expect("Creation of temporary directory failed");
    for value in values {
        let directory = root.path().join(format!("{}.dir", value));
        fs::create_dir(&directory).expect("Creation of sub directory failed");
        for index in 0..image_count {
            let path = directory.join(format!("{}.{}.png", value, index));
            create_solid_image(&path, *value, 40, 30);
        }
    }
    root
}

fn create_test_results(values: &[u8]) -> Vec<ImageResult> {
    values
        .iter()
        .map(|value| ImageResult::new(format!("test.{}", value), *value, *value, *value))
        .collect()
}

#[test]
fn test_average_image_values() {
    let directory = TempDir::new().unwrap();
    for value in [0, 127, 255] {
        let path = directory.path().join(format!("{}.png", value));
        create_solid_image(&path, value, 200, 200);
        for downsample in [true, false] {
            let options = AveragingOptions {
                downsample,
                ..AveragingOptions::default()
            };
            let result = average_image_file(&path, None, &options).unwrap();
            assert_eq!(result.name, format!("{}.png", value));
            assert_eq!(result.rgb(), [value, value, value]);
        }
    }
}

#[test]
fn test_average_image_with_explicit_name() {
    let directory = create_test_directory(&[42]);
    let path = directory.path().join("42.png");
    let result = average_image_file(&path, Some("answer"), &AveragingOptions::default()).unwrap();
    assert_eq!(result, ImageResult::new("answer", 42, 42, 42));
}

#[test]
fn test_average_image_ignores_transparent_border() {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("framed.png");
    RgbaImage::from_fn(30, 30, |x, y| {
        if x < 5 || y < 5 {
            Rgba([255, 0, 0, 0])
        } else {
            Rgba([10, 100, 200, 255])
        }
    })
    .save(&path)
    .unwrap();
    let result = average_image_file(&path, None, &AveragingOptions::default()).unwrap();
    assert_eq!(result.rgb(), [10, 100, 200]);
}

#[test]
fn test_missing_image_fails_to_open() {
    let directory = TempDir::new().unwrap();
    let result = average_image_file(
        &directory.path().join("missing.png"),
        None,
        &AveragingOptions::default(),
    );
    let error = result.expect_err("Missing file must not be averaged");
    assert!(error.is_image_open_error());
}

#[test]
fn test_average_each_image() {
    let values = [0, 127, 255];
    let directory = create_test_directory(&values);
    let results = average_each_image(directory.path(), FORMATS, &AveragingOptions::default()).unwrap();
    assert_eq!(results.len(), values.len());
    for result in results {
        let value: u8 = result.name.trim_end_matches(".png").parse().unwrap();
        assert_eq!(result.name, format!("{}.png", value));
        assert_eq!(result.rgb(), [value, value, value]);
    }
}

#[test]
fn test_average_directory() {
    let values = [0, 127, 255];
    let directory = create_test_directory(&values);
    let result = average_directory(directory.path(), FORMATS, &AveragingOptions::default()).unwrap();
    let name = directory.path().file_name().unwrap().to_str().unwrap();
    assert_eq!(result, ImageResult::new(name, 127, 127, 127));
}

fn create_jpeg_test_directory(values: &[u8]) -> TempDir {
    let directory = TempDir::new().expect("Creation of temporary directory failed");
    for value in values {
        create_solid_image(&directory.path().join(format!("{}.jpg", value)), *value, 64, 48);
    }
    directory
}

#[test]
fn test_average_jpeg_image() {
    let directory = create_jpeg_test_directory(&[127]);
    let path = directory.path().join("127.jpg");
    let result = average_image_file(&path, None, &AveragingOptions::default()).unwrap();
    assert_eq!(result, ImageResult::new("127.jpg", 127, 127, 127));
}

#[test]
fn test_average_jpeg_directory() {
    let directory = create_jpeg_test_directory(&[0, 127, 255]);
    let result = average_directory(directory.path(), FORMATS, &AveragingOptions::default()).unwrap();
    assert_eq!(result.rgb(), [127, 127, 127]);
}

#[test]
fn test_average_directory_with_options() {
    let directory = TempDir::new().unwrap();
    RgbaImage::from_fn(10, 10, |x, _| {
        if x < 5 {
            Rgba([200, 200, 200, 100])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
    .save(directory.path().join("half.png"))
    .unwrap();
    let options = AveragingOptions {
        alpha_threshold: 50,
        ..AveragingOptions::default()
    };
    let result = average_directory(directory.path(), FORMATS, &options).unwrap();
    assert_eq!(result.rgb(), [100, 100, 100]);
    let result =
        average_directory(directory.path(), FORMATS, &AveragingOptions::default()).unwrap();
    assert_eq!(result.rgb(), [0, 0, 0]);
}

#[test]
fn test_average_empty_directory_fails() {
    let directory = create_test_directory(&[]);
    let result = average_directory(directory.path(), FORMATS, &AveragingOptions::default());
    assert!(matches!(result, Err(Error::DirectoryAveraging(_))));
}

#[test]
fn test_average_tree() {
    let values = [0, 127, 255];
    let root = create_nested_test_directories(&values, 3);
    let results = average_tree(root.path(), FORMATS, &AveragingOptions::default()).unwrap();
    assert_eq!(results.len(), values.len());
    for result in results {
        let value: u8 = result.name.trim_end_matches(".dir").parse().unwrap();
        assert_eq!(result.rgb(), [value, value, value]);
    }
}

#[test]
fn test_csv_round_trip() {
    let results = create_test_results(&[0, 127, 255]);
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("results.csv");
    write_csv(&results, &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("File or Folder,Red,Green,Blue\n"));
    assert_eq!(read_csv(&path).unwrap(), results);
}

#[test]
fn test_empty_results_fail() {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("empty.csv");
    assert!(matches!(write_csv(&[], &path), Err(Error::EmptyResultSet)));
    assert!(!path.exists(), "No CSV file must be created for empty results");
    assert!(matches!(to_line(&[]), Err(Error::EmptyResultSet)));
    assert!(matches!(
        to_rectangle(&[], AspectRatio::default()),
        Err(Error::EmptyResultSet)
    ));
}

#[test]
fn test_line_image_can_be_averaged_again() {
    let results = create_test_results(&[0, 127, 255]);
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("line.png");
    let image = to_line(&results).unwrap();
    assert_eq!((image.width(), image.height()), (3, 1));
    image.save(&path).unwrap();
    let result = average_image_file(&path, None, &AveragingOptions::default()).unwrap();
    assert_eq!(result.rgb(), [127, 127, 127]);
}

fn get_path_string(path: &Path) -> &str {
    path.to_str().expect("Temporary path must be valid UTF-8")
}

fn get_output_paths(directory: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    (
        directory.path().join("results.csv"),
        directory.path().join("line.png"),
        directory.path().join("rectangle.png"),
    )
}

#[test]
fn test_average_and_export_tree() {
    let root = create_nested_test_directories(&[10, 20, 30, 40, 50, 60], 2);
    let output = TempDir::new().unwrap();
    let (csv_path, line_path, rectangle_path) = get_output_paths(&output);
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        get_path_string(root.path()),
        "--mode",
        "tree",
        "--threads",
        "2",
        "--csv",
        get_path_string(&csv_path),
        "--line",
        get_path_string(&line_path),
        "--rectangle",
        get_path_string(&rectangle_path),
    ]);
    let results = average_and_export(&arguments).expect("Averaging failed");
    assert_eq!(results.len(), 6);
    assert_eq!(read_csv(&csv_path).unwrap(), results);
    let line = image::open(&line_path).unwrap();
    assert_eq!((line.width(), line.height()), (6, 1));
    let rectangle = image::open(&rectangle_path).unwrap();
    assert_eq!((rectangle.width(), rectangle.height()), (3, 2));
}

#[test]
fn test_average_and_export_reloads_csv() {
    let output = TempDir::new().unwrap();
    let csv_path = output.path().join("saved.csv");
    let saved = create_test_results(&[1, 2, 3, 4]);
    write_csv(&saved, &csv_path).unwrap();
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec!["test", get_path_string(&csv_path), "-m", "csv"]);
    assert_eq!(average_and_export(&arguments).unwrap(), saved);
}

#[test]
fn test_average_and_export_filters_formats() {
    let directory = create_test_directory(&[0, 255]);
    create_solid_image(&directory.path().join("127.jpg"), 127, 64, 48);
    let input = get_path_string(directory.path());

    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec!["test", input, "-m", "each", "--formats", "png"]);
    let names: Vec<String> = average_and_export(&arguments)
        .unwrap()
        .into_iter()
        .map(|result| result.name)
        .collect();
    assert_eq!(names, ["0.png", "255.png"]);

    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec!["test", input, "-m", "directory", "-f", "png"]);
    assert_eq!(average_and_export(&arguments).unwrap()[0].rgb(), [127, 127, 127]);

    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec!["test", input, "-m", "each", "-f", "jpeg,png"]);
    let results = average_and_export(&arguments).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[1], ImageResult::new("127.jpg", 127, 127, 127));
}
