//! `/surat-masuk` endpoints.
//!
//! Intake is two requests: [`detect`](SuratMasukService::detect) uploads the
//! file and returns a `file_token`, [`confirm`](SuratMasukService::confirm)
//! persists the reviewed fields against that token. Letters entered without
//! detection go through [`create`](SuratMasukService::create) with the file.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::intake::DetectionMethod;
use crate::models::{
    ConfirmSuratMasuk, CreateSuratMasuk, DetectMasukResult, FormFields, OcrResult, SuratMasuk,
    SuratMasukQuery, UpdateSuratMasuk, UploadFile,
};

pub struct SuratMasukService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl SuratMasukService<'_> {
    pub async fn list(&self, query: &SuratMasukQuery) -> Result<Vec<SuratMasuk>> {
        self.client.get_json("/surat-masuk", query).await
    }

    pub async fn get(&self, id: i64) -> Result<SuratMasuk> {
        self.client.get(&format!("/surat-masuk/{id}")).await
    }

    pub async fn detect(&self, file: &UploadFile, method: DetectionMethod) -> Result<DetectMasukResult> {
        tracing::info!("Detecting {} ({})", file.name, method.as_str());
        let form = FormFields::new()
            .text("method", method.as_str())
            .into_form(Some(file));
        self.client.send_multipart("/surat-masuk/detect", form).await
    }

    pub async fn confirm(&self, payload: &ConfirmSuratMasuk) -> Result<SuratMasuk> {
        let form = payload.fields().into_form(None);
        self.client.send_multipart("/surat-masuk", form).await
    }

    pub async fn create(&self, payload: &CreateSuratMasuk, file: Option<&UploadFile>) -> Result<SuratMasuk> {
        let form = payload.fields().into_form(file);
        self.client.send_multipart("/surat-masuk", form).await
    }

    pub async fn update(&self, id: i64, payload: &UpdateSuratMasuk) -> Result<SuratMasuk> {
        self.client
            .send_json(Method::PUT, &format!("/surat-masuk/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/surat-masuk/{id}")).await
    }

    pub async fn download_file(&self, id: i64) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("/surat-masuk/{id}/file"), &())
            .await
    }

    /// Run OCR again on the stored file.
    pub async fn reprocess_ocr(&self, id: i64) -> Result<OcrResult> {
        self.client
            .send_empty(Method::POST, &format!("/surat-masuk/{id}/process-ocr"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_support::client;
    use crate::models::{Priority, SuratStatus};

    fn letter_body() -> serde_json::Value {
        json!({
            "id": 11,
            "nomor_surat": "005/UND/2024",
            "tanggal_surat": "2024-05-02",
            "tanggal_terima": "2024-05-03",
            "pengirim": "Dinas Pendidikan",
            "perihal": "Undangan Rapat",
            "status": "baru",
            "priority": "sedang",
            "created_at": "2024-05-03T10:00:00"
        })
    }

    #[tokio::test]
    async fn test_list_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/surat-masuk"))
            .and(query_param("search", "rapat"))
            .and(query_param("status", "baru"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([letter_body()])))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let letters = client
            .surat_masuk()
            .list(&SuratMasukQuery {
                limit: Some(100),
                search: Some("rapat".into()),
                status: Some(SuratStatus::Baru),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(letters[0].perihal, "Undangan Rapat");
    }

    #[tokio::test]
    async fn test_detect_sends_file_and_method() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/surat-masuk/detect"))
            .and(header("authorization", "Bearer tok"))
            .and(body_string_contains("name=\"method\""))
            .and(body_string_contains("regex"))
            .and(body_string_contains("filename=\"scan.pdf\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "file_token": "ft-1",
                "file_size": 4,
                "original_filename": "scan.pdf",
                "mime_type": "application/pdf",
                "ocr_text": "UNDANGAN",
                "ocr_confidence": 88.0,
                "keywords": ["undangan"],
                "detected": {
                    "nomor_surat": {"value": "005/UND/2024", "detected": true},
                    "tanggal_surat": {"value": null, "detected": false},
                    "pengirim": {"value": "Dinas Pendidikan", "detected": true},
                    "perihal": {"value": "Undangan", "detected": true}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let file = UploadFile::new("scan.pdf", b"%PDF".to_vec());
        let result = client
            .surat_masuk()
            .detect(&file, DetectionMethod::Regex)
            .await
            .unwrap();
        assert_eq!(result.file_token, "ft-1");
        assert_eq!(result.detected.pengirim.text(), Some("Dinas Pendidikan"));
        assert!(result.ai_error.is_none());
    }

    #[tokio::test]
    async fn test_confirm_posts_token_without_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/surat-masuk"))
            .and(body_string_contains("name=\"file_token\""))
            .and(body_string_contains("ft-1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(letter_body()))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let saved = client
            .surat_masuk()
            .confirm(&ConfirmSuratMasuk {
                file_token: "ft-1".into(),
                nomor_surat: Some("005/UND/2024".into()),
                tanggal_surat: day,
                tanggal_terima: day,
                pengirim: "Dinas Pendidikan".into(),
                perihal: "Undangan Rapat".into(),
                isi_singkat: None,
                kategori_id: None,
                priority: Priority::Sedang,
                ocr_text: None,
                ocr_confidence: None,
            })
            .await
            .unwrap();
        assert_eq!(saved.id, 11);

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("name=\"file\""));
        assert!(!body.contains("isi_singkat"));
    }

    #[tokio::test]
    async fn test_download_file_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/surat-masuk/11/file"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let bytes = client.surat_masuk().download_file(11).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4");
    }
}
