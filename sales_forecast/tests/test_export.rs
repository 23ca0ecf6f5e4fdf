use pretty_assertions::assert_eq;
use sales_forecast::export::EXPORT_FILE_NAME;
use sales_forecast::{Forecaster, SalesRow, SalesSeries, SalesTable};
use tempfile::tempdir;

#[test]
fn test_csv_round_trip() {
    let table = SalesTable::from_rows(vec![
        SalesRow { week: 1, sales: 10.0 },
        SalesRow { week: 2, sales: 20.0 },
        SalesRow { week: 3, sales: 30.0 },
    ]);

    let bytes = table.to_csv_bytes().unwrap();
    let parsed = SalesTable::from_csv_reader(bytes.as_slice()).unwrap();

    assert_eq!(parsed.rows(), table.rows());
}

#[test]
fn test_export_header_and_no_index() {
    let series = SalesSeries::new(vec![10.0, 20.0]).unwrap();
    let prediction = Forecaster::default().with_horizon(2).predict(&series).unwrap();
    let table = SalesTable::from_forecast(&series, prediction.result());

    let text = String::from_utf8(table.to_csv_bytes().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Week,Sales");
    assert_eq!(lines.len(), 5);
    assert!(lines[1..].iter().all(|line| line.split(',').count() == 2));
    assert_eq!(lines[4], "4,15.0");
}

#[test]
fn test_save_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);

    let series = SalesSeries::new(vec![3.0, 6.0, 9.0, 12.0, 15.0]).unwrap();
    let prediction = Forecaster::default().predict(&series).unwrap();
    let table = SalesTable::from_forecast(&series, prediction.result());
    table.save_csv(&path).unwrap();

    let reread = SalesTable::from_csv_reader(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(reread.rows(), table.rows());
    let weeks: Vec<usize> = reread.rows().iter().map(|r| r.week).collect();
    assert_eq!(weeks, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_malformed_csv_rejected() {
    let result = SalesTable::from_csv_reader("Week,Sales\n1,abc\n".as_bytes());
    assert!(result.is_err());
}
