//! `/surat-keluar` endpoints. Same intake shape as surat masuk; the outgoing
//! number is assigned by the server.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::intake::DetectionMethod;
use crate::models::{
    ConfirmSuratKeluar, CreateSuratKeluar, DetectKeluarResult, FormFields, SuratKeluar, SuratKeluarQuery,
    UpdateSuratKeluar, UploadFile,
};

pub struct SuratKeluarService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl SuratKeluarService<'_> {
    pub async fn list(&self, query: &SuratKeluarQuery) -> Result<Vec<SuratKeluar>> {
        self.client.get_json("/surat-keluar", query).await
    }

    pub async fn get(&self, id: i64) -> Result<SuratKeluar> {
        self.client.get(&format!("/surat-keluar/{id}")).await
    }

    pub async fn detect(&self, file: &UploadFile, method: DetectionMethod) -> Result<DetectKeluarResult> {
        tracing::info!("Detecting {} ({})", file.name, method.as_str());
        let form = FormFields::new()
            .text("method", method.as_str())
            .into_form(Some(file));
        self.client.send_multipart("/surat-keluar/detect", form).await
    }

    pub async fn confirm(&self, payload: &ConfirmSuratKeluar) -> Result<SuratKeluar> {
        let form = payload.fields().into_form(None);
        self.client.send_multipart("/surat-keluar", form).await
    }

    pub async fn create(&self, payload: &CreateSuratKeluar, file: Option<&UploadFile>) -> Result<SuratKeluar> {
        let form = payload.fields().into_form(file);
        self.client.send_multipart("/surat-keluar", form).await
    }

    pub async fn update(&self, id: i64, payload: &UpdateSuratKeluar) -> Result<SuratKeluar> {
        self.client
            .send_json(Method::PUT, &format!("/surat-keluar/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/surat-keluar/{id}")).await
    }

    pub async fn download_file(&self, id: i64) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("/surat-keluar/{id}/file"), &())
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_support::client;
    use crate::error::ApiError;
    use crate::models::Priority;

    #[tokio::test]
    async fn test_create_with_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/surat-keluar"))
            .and(body_string_contains("name=\"penerima\""))
            .and(body_string_contains("name=\"file\"; filename=\"balasan.png\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 3,
                "nomor_surat_keluar": "SK/003/2024",
                "tanggal_surat": "2024-06-01",
                "penerima": "Bupati",
                "perihal": "Balasan",
                "status": "baru",
                "priority": "tinggi",
                "created_at": "2024-06-01T08:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let file = UploadFile::new("balasan.png", b"PNG".to_vec());
        let saved = client
            .surat_keluar()
            .create(
                &CreateSuratKeluar {
                    tanggal_surat: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    penerima: "Bupati".into(),
                    perihal: "Balasan".into(),
                    tembusan: None,
                    isi_singkat: None,
                    kategori_id: None,
                    status: None,
                    priority: Priority::Tinggi,
                },
                Some(&file),
            )
            .await
            .unwrap();
        assert_eq!(saved.nomor_surat_keluar, "SK/003/2024");
    }

    #[tokio::test]
    async fn test_detect_error_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/surat-keluar/detect"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": "Format file tidak didukung"
            })))
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let file = UploadFile::new("scan.jpg", vec![1, 2, 3]);
        let err = client
            .surat_keluar()
            .detect(&file, DetectionMethod::OcrOnly)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                detail: "Format file tidak didukung".into()
            }
        );
    }
}
