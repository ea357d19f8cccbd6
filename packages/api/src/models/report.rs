use chrono::NaiveDate;
use serde::Serialize;

use super::surat::SuratType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Excel,
    Pdf,
}

impl ReportFormat {
    /// Path segment under `/reports/{register}/`.
    pub fn path_segment(self) -> &'static str {
        match self {
            ReportFormat::Excel => "excel",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ReportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ReportFormat::Pdf => "application/pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Excel => "Excel",
            ReportFormat::Pdf => "PDF",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReportParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori_id: Option<i64>,
}

/// `surat_masuk_2024-05-01.xlsx` style download name.
pub fn report_filename(kind: SuratType, format: ReportFormat, on: NaiveDate) -> String {
    let stem = kind.slug().replace('-', "_");
    format!("{}_{}.{}", stem, on.format("%Y-%m-%d"), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            report_filename(SuratType::Masuk, ReportFormat::Excel, day),
            "surat_masuk_2024-05-01.xlsx"
        );
        assert_eq!(
            report_filename(SuratType::Keluar, ReportFormat::Pdf, day),
            "surat_keluar_2024-05-01.pdf"
        );
    }

    #[test]
    fn test_params_serialise() {
        let params = ReportParams {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"start_date": "2024-01-01"})
        );
    }
}
