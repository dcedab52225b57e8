use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::notificaciones::repo::{EstadoNotificacion, Recordatorio, TipoNotificacion};

#[derive(Debug, Deserialize)]
pub struct FiltroNotificaciones {
    pub estado: Option<EstadoNotificacion>,
    pub tipo: Option<TipoNotificacion>,
}

#[derive(Debug, Deserialize)]
pub struct CrearNotificacion {
    pub titulo: String,
    pub mensaje: String,
    pub tipo: TipoNotificacion,
    pub documento_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct FiltroRecordatorios {
    pub activo: Option<bool>,
    pub documento_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CrearRecordatorio {
    pub documento_id: Uuid,
    pub titulo: String,
    pub mensaje: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub fecha_programada: OffsetDateTime,
    #[serde(default)]
    pub repetir: bool,
    pub intervalo_repeticion: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActualizarRecordatorio {
    pub titulo: Option<String>,
    pub mensaje: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub fecha_programada: Option<OffsetDateTime>,
    pub repetir: Option<bool>,
    pub intervalo_repeticion: Option<i32>,
    pub activo: Option<bool>,
}

impl ActualizarRecordatorio {
    /// Copies every provided field onto the reminder, returning how many
    /// changed.
    pub fn aplicar(&self, recordatorio: &mut Recordatorio) -> usize {
        let mut cambios = 0;
        if let Some(titulo) = &self.titulo {
            recordatorio.titulo = titulo.clone();
            cambios += 1;
        }
        if let Some(mensaje) = &self.mensaje {
            recordatorio.mensaje = Some(mensaje.clone());
            cambios += 1;
        }
        if let Some(fecha) = self.fecha_programada {
            recordatorio.fecha_programada = fecha;
            cambios += 1;
        }
        if let Some(repetir) = self.repetir {
            recordatorio.repetir = repetir;
            cambios += 1;
        }
        if let Some(intervalo) = self.intervalo_repeticion {
            recordatorio.intervalo_repeticion = Some(intervalo);
            cambios += 1;
        }
        if let Some(activo) = self.activo {
            recordatorio.activo = activo;
            cambios += 1;
        }
        cambios
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn recordatorio() -> Recordatorio {
        Recordatorio {
            recordatorio_id: Uuid::new_v4(),
            usuario_id: Uuid::new_v4(),
            documento_id: Uuid::new_v4(),
            titulo: "devolver libro".into(),
            mensaje: Some("prestamo vence pronto".into()),
            fecha_programada: OffsetDateTime::now_utc(),
            repetir: false,
            intervalo_repeticion: None,
            activo: true,
            fecha_creacion: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn parche_vacio_no_cambia_nada() {
        let mut r = recordatorio();
        assert_eq!(ActualizarRecordatorio::default().aplicar(&mut r), 0);
        assert_eq!(r.titulo, "devolver libro");
    }

    #[test]
    fn parche_parcial_solo_toca_lo_enviado() {
        let mut r = recordatorio();
        let parche = ActualizarRecordatorio {
            titulo: Some("renovar prestamo".into()),
            ..Default::default()
        };
        assert_eq!(parche.aplicar(&mut r), 1);
        assert_eq!(r.titulo, "renovar prestamo");
        assert_eq!(r.mensaje.as_deref(), Some("prestamo vence pronto"));
    }

    #[test]
    fn parche_multiple_cuenta_cada_campo() {
        let mut r = recordatorio();
        let parche = ActualizarRecordatorio {
            repetir: Some(true),
            intervalo_repeticion: Some(7),
            activo: Some(false),
            ..Default::default()
        };
        assert_eq!(parche.aplicar(&mut r), 3);
        assert!(r.repetir);
        assert_eq!(r.intervalo_repeticion, Some(7));
        assert!(!r.activo);
    }
}
