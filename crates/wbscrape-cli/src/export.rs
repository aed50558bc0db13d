//! CSV export of crawled records.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use wbscrape_core::{ProductRecord, SalesOutcome};

pub(crate) const HEADERS: [&str; 10] = [
    "Ссылка",
    "Артикул",
    "Наименование",
    "Бренд",
    "ID бренда",
    "Цена",
    "Цена со скидкой",
    "Рейтинг",
    "Отзывы",
    "Продано",
];

/// `{output_dir}/{label}_{YYYY-MM-DD}.csv`, with path separators in `label`
/// replaced so the file always lands directly in `output_dir`.
pub(crate) fn dataset_path(output_dir: &Path, label: &str, date: NaiveDate) -> PathBuf {
    let mut label: String = label
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if label.is_empty() {
        label.push_str("dataset");
    }
    output_dir.join(format!("{label}_{}.csv", date.format("%Y-%m-%d")))
}

/// Text of the `Продано` column, using the labels of the historical
/// datasets: an empty lookup reads `неизвестно`, a timed-out lookup reads
/// `нет данных`. Records that were never enriched get an empty cell.
pub(crate) fn sales_cell(outcome: Option<SalesOutcome>) -> String {
    match outcome {
        Some(SalesOutcome::Count(n)) => n.to_string(),
        Some(SalesOutcome::Unavailable) => "неизвестно".to_owned(),
        Some(SalesOutcome::Unknown) => "нет данных".to_owned(),
        None => String::new(),
    }
}

/// Writes `records` as CSV with a header row, in the given order.
pub(crate) fn write_dataset<W: io::Write>(
    writer: W,
    records: &[ProductRecord],
) -> anyhow::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADERS)?;
    for r in records {
        out.write_record([
            r.listing_url.clone(),
            r.item_id.to_string(),
            r.name.clone(),
            r.brand_name.clone(),
            r.brand_id.to_string(),
            r.regular_price.to_string(),
            r.discounted_price.to_string(),
            r.rating.to_string(),
            r.review_count.to_string(),
            sales_cell(r.sales_count),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the dataset file for `label` and returns its path.
///
/// # Errors
///
/// Returns an error if `output_dir` cannot be created or the file cannot be
/// written.
pub(crate) fn export_dataset(
    output_dir: &Path,
    label: &str,
    date: NaiveDate,
    records: &[ProductRecord],
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let path = dataset_path(output_dir, label, date);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_dataset(file, records).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn record(item_id: u64, sales_count: Option<SalesOutcome>) -> ProductRecord {
        ProductRecord {
            listing_url: format!("https://www.wildberries.ru/catalog/{item_id}/detail.aspx"),
            item_id,
            name: "Кружка, белая".to_owned(),
            brand_name: "Home".to_owned(),
            brand_id: 77,
            regular_price: 1234,
            discounted_price: 999,
            rating: 4.5,
            review_count: 12,
            sales_count,
        }
    }

    #[test]
    fn dataset_path_uses_label_and_date() {
        let path = dataset_path(Path::new("out"), "Детективы", date());
        assert_eq!(path, Path::new("out").join("Детективы_2024-03-09.csv"));
    }

    #[test]
    fn dataset_path_replaces_separators() {
        let path = dataset_path(Path::new("out"), "Книги/Комиксы\\Манга", date());
        assert_eq!(path, Path::new("out").join("Книги_Комиксы_Манга_2024-03-09.csv"));
    }

    #[test]
    fn dataset_path_falls_back_for_blank_label() {
        let path = dataset_path(Path::new("."), "  ", date());
        assert_eq!(path, Path::new(".").join("dataset_2024-03-09.csv"));
    }

    #[test]
    fn sales_cells_distinguish_outcomes() {
        assert_eq!(sales_cell(Some(SalesOutcome::Count(0))), "0");
        assert_eq!(sales_cell(Some(SalesOutcome::Count(15))), "15");
        assert_eq!(sales_cell(Some(SalesOutcome::Unavailable)), "неизвестно");
        assert_eq!(sales_cell(Some(SalesOutcome::Unknown)), "нет данных");
        assert_eq!(sales_cell(None), "");
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let mut buf = Vec::new();
        write_dataset(
            &mut buf,
            &[
                record(2, Some(SalesOutcome::Count(5))),
                record(1, Some(SalesOutcome::Unavailable)),
                record(3, None),
            ],
        )
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Ссылка,Артикул,Наименование,Бренд,ID бренда,Цена,Цена со скидкой,Рейтинг,Отзывы,Продано"
        );
        assert_eq!(
            lines[1],
            "https://www.wildberries.ru/catalog/2/detail.aspx,2,\"Кружка, белая\",Home,77,1234,999,4.5,12,5"
        );
        assert!(lines[2].ends_with(",неизвестно"));
        assert!(lines[3].ends_with(",12,"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn export_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("datasets");

        let path = export_dataset(&out, "чай", date(), &[record(1, None)]).unwrap();

        assert_eq!(path, out.join("чай_2024-03-09.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
