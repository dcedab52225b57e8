use anyhow::Context;
use axum::async_trait;
use serde_json::json;
use tracing::{debug, warn};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const EMBED_MODEL: &str = "models/embedding-001";
const GEN_MODEL: &str = "models/gemini-1.5-flash";

const RESPUESTA_FALLBACK: &str =
    "Lo siento, no puedo generar una respuesta en este momento. Intente nuevamente más tarde.";

/// External embedding/generation capability. Failures degrade (zero
/// similarity, apologetic text) instead of failing the request.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn similitud_semantica(&self, texto_a: &str, texto_b: &str) -> f64;
    async fn generar_respuesta(&self, consulta: &str, contexto: &str) -> String;
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
        }
    }

    async fn embed(&self, texto: &str) -> anyhow::Result<Vec<f64>> {
        let texto = if texto.trim().is_empty() {
            "contenido vacío"
        } else {
            texto
        };
        let url = format!("{API_BASE}/{EMBED_MODEL}:embedContent?key={}", self.api_key);
        let body = json!({
            "model": EMBED_MODEL,
            "content": { "parts": [{ "text": texto }] },
        });
        let res = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("embedContent request")?
            .error_for_status()
            .context("embedContent status")?;
        let payload: serde_json::Value = res.json().await.context("embedContent body")?;
        let values = payload["embedding"]["values"]
            .as_array()
            .context("embedding values missing")?
            .iter()
            .filter_map(|v| v.as_f64())
            .collect();
        Ok(values)
    }
}

#[async_trait]
impl AiProvider for GeminiClient {
    async fn similitud_semantica(&self, texto_a: &str, texto_b: &str) -> f64 {
        if texto_a.trim().is_empty() || texto_b.trim().is_empty() {
            warn!("comparando textos vacíos, similitud cero");
            return 0.0;
        }
        let (a, b) = match tokio::try_join!(self.embed(texto_a), self.embed(texto_b)) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "fallo obteniendo embeddings, similitud cero");
                return 0.0;
            }
        };
        let similitud = similitud_coseno(&a, &b);
        debug!(similitud, "similitud calculada");
        similitud
    }

    async fn generar_respuesta(&self, consulta: &str, contexto: &str) -> String {
        let url = format!("{API_BASE}/{GEN_MODEL}:generateContent?key={}", self.api_key);
        let prompt = format!(
            "Responde a la siguiente consulta basándote únicamente en el contexto dado.\n\n\
             Contexto:\n{contexto}\n\nConsulta: {consulta}"
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        let res = async {
            let payload: serde_json::Value = self
                .http
                .post(&url)
                .json(&body)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            anyhow::Ok(payload["candidates"][0]["content"]["parts"][0]["text"]
                .as_str()
                .map(|s| s.to_string()))
        }
        .await;
        match res {
            Ok(Some(texto)) => texto,
            Ok(None) => RESPUESTA_FALLBACK.to_string(),
            Err(e) => {
                warn!(error = %e, "fallo generando respuesta");
                RESPUESTA_FALLBACK.to_string()
            }
        }
    }
}

pub fn similitud_coseno(a: &[f64], b: &[f64]) -> f64 {
    let punto: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norma_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norma_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norma_a == 0.0 || norma_b == 0.0 {
        return 0.0;
    }
    punto / (norma_a * norma_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coseno_de_vectores_iguales_es_uno() {
        let v = [0.5, 0.2, 0.8];
        assert!((similitud_coseno(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn coseno_de_ortogonales_es_cero() {
        assert_eq!(similitud_coseno(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn coseno_con_vector_cero_es_cero() {
        assert_eq!(similitud_coseno(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn similitud_de_texto_vacio_es_cero_sin_llamadas() {
        // Empty inputs short-circuit before any network request.
        let client = GeminiClient::new("");
        assert_eq!(client.similitud_semantica("", "algo").await, 0.0);
        assert_eq!(client.similitud_semantica("algo", "   ").await, 0.0);
    }
}
