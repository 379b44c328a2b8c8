use pretty_assertions::assert_eq;
use price_forecast::{ForecastError, TrainingExample, WindowedDatasetBuilder};
use rstest::rstest;

#[test]
fn test_single_window_example() {
    let builder = WindowedDatasetBuilder::new(5).unwrap();
    let examples = builder.build(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();

    assert_eq!(
        examples,
        vec![TrainingExample {
            input: vec![0.1, 0.2, 0.3, 0.4, 0.5],
            output: 0.6,
        }]
    );
}

#[rstest]
#[case(6, 5)]
#[case(60, 5)]
#[case(50, 10)]
#[case(2, 1)]
fn test_dataset_size(#[case] len: usize, #[case] window: usize) {
    let series: Vec<f64> = (0..len).map(|i| i as f64 / len as f64).collect();

    let examples = WindowedDatasetBuilder::new(window)
        .unwrap()
        .build(&series)
        .unwrap();

    assert_eq!(examples.len(), len - window);
    assert!(examples.iter().all(|e| e.input.len() == window));
}

#[rstest]
#[case(5, 5)]
#[case(3, 5)]
#[case(0, 5)]
fn test_short_series_rejected(#[case] len: usize, #[case] window: usize) {
    let series = vec![0.5; len];

    let result = WindowedDatasetBuilder::new(window).unwrap().build(&series);
    match result {
        Err(ForecastError::InsufficientData { required, actual }) => {
            assert_eq!(required, window + 1);
            assert_eq!(actual, len);
        }
        other => panic!("Expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_windows_slide_by_one() {
    let series = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
    let examples = WindowedDatasetBuilder::new(3).unwrap().build(&series).unwrap();

    for (i, example) in examples.iter().enumerate() {
        assert_eq!(example.input, series[i..i + 3].to_vec());
        assert_eq!(example.output, series[i + 3]);
    }
}
