// CSVエクスポート

use super::models::Subscription;
use crate::shared::errors::AppResult;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSVのヘッダー行
pub const CSV_HEADER: [&str; 5] = ["name", "category", "serviceKey", "price", "createdAt"];

/// 表計算ソフト向けのUTF-8 BOM
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 作成時刻（ミリ秒）をISO-8601形式（UTC）に変換する
///
/// 例: `2024-01-01T00:00:00.000Z`。表現できない時刻はUnixエポックとして出力する
pub fn format_created_at(created_at: i64) -> String {
    DateTime::from_timestamp_millis(created_at)
        .unwrap_or_else(|| {
            log::warn!("作成時刻が範囲外のためUnixエポックで出力します: createdAt={created_at}");
            DateTime::<Utc>::default()
        })
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// サブスクリプション一覧をCSVとして書き出す
///
/// # 引数
/// * `subscriptions` - 全レコード（一覧の順に出力する）
/// * `writer` - 出力先
///
/// # 戻り値
/// 成功時はOk(())、失敗時はCSVまたはI/Oエラー
pub fn export_csv<W: Write>(subscriptions: &[Subscription], writer: W) -> AppResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for sub in subscriptions {
        let price = sub.price.to_string();
        let created_at = format_created_at(sub.created_at);

        csv_writer.write_record([
            sub.name.as_str(),
            sub.category.as_str(),
            sub.service_key(),
            price.as_str(),
            created_at.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// CSVファイルとして書き出す（先頭にBOMを付与する）
pub fn export_csv_file(subscriptions: &[Subscription], path: &Path) -> AppResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(UTF8_BOM)?;
    export_csv(subscriptions, &mut writer)?;
    writer.flush()?;

    log::info!(
        "{}件のサブスクリプションをエクスポートしました: {path:?}",
        subscriptions.len()
    );
    Ok(())
}

/// 既定のエクスポートファイル名
pub fn default_file_name(date: NaiveDate) -> String {
    format!("abonelikler-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sub(name: &str, service_key: &str, created_at: i64) -> Subscription {
        Subscription {
            id: "id".to_string(),
            name: name.to_string(),
            price: 19.99,
            category: "Streaming".to_string(),
            service_key: Some(service_key.to_string()),
            icon: Some("🎬".to_string()),
            created_at,
        }
    }

    fn export_to_string(subs: &[Subscription]) -> String {
        let mut buf = Vec::new();
        export_csv(subs, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_created_at() {
        assert_eq!(format_created_at(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_created_at(1_704_067_200_123), "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_out_of_range_created_at_falls_back_to_epoch() {
        assert_eq!(format_created_at(i64::MAX), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_created_at(i64::MIN), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_export_rows() {
        let csv = export_to_string(&[sub("Netflix", "netflix", 0)]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "name,category,serviceKey,price,createdAt");
        assert_eq!(lines[1], "Netflix,Streaming,netflix,19.99,1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_export_quotes_special_characters() {
        let csv = export_to_string(&[sub("Film, \"Dizi\"", "", 0)]);

        assert!(csv.contains("\"Film, \"\"Dizi\"\"\",Streaming,other,"));
    }

    #[test]
    fn test_export_empty_store_writes_header_only() {
        assert_eq!(
            export_to_string(&[]),
            "name,category,serviceKey,price,createdAt\n"
        );
    }

    #[test]
    fn test_export_csv_file_has_bom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        export_csv_file(&[sub("Çizgi Film", "other", 0)], &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert!(bytes.starts_with(UTF8_BOM));
        assert!(String::from_utf8_lossy(&bytes).contains("Çizgi Film"));
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(default_file_name(date), "abonelikler-2024-03-09.csv");
    }
}
