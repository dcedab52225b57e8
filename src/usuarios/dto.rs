use serde::Deserialize;

use crate::usuarios::repo::{Rol, Usuario};

/// Registration body: the record minus its id, with optional flags.
#[derive(Debug, Deserialize)]
pub struct CrearUsuario {
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    pub contra: String,
    pub pais: String,
    pub ciudad: String,
    #[serde(default)]
    pub inactivo: bool,
    pub rol: Option<Rol>,
}

/// Partial update: only non-null fields overwrite the stored record.
#[derive(Debug, Default, Deserialize)]
pub struct ActualizarUsuario {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub correo: Option<String>,
    pub contra: Option<String>,
    pub pais: Option<String>,
    pub ciudad: Option<String>,
    pub inactivo: Option<bool>,
    pub rol: Option<Rol>,
}

impl ActualizarUsuario {
    /// Merges the patch into `usuario` and returns how many fields applied.
    pub fn aplicar(&self, usuario: &mut Usuario) -> usize {
        let mut aplicados = 0;
        if let Some(v) = &self.nombres {
            usuario.nombres = v.clone();
            aplicados += 1;
        }
        if let Some(v) = &self.apellidos {
            usuario.apellidos = v.clone();
            aplicados += 1;
        }
        if let Some(v) = &self.correo {
            usuario.correo = v.clone();
            aplicados += 1;
        }
        if let Some(v) = &self.contra {
            usuario.contra = v.clone();
            aplicados += 1;
        }
        if let Some(v) = &self.pais {
            usuario.pais = v.clone();
            aplicados += 1;
        }
        if let Some(v) = &self.ciudad {
            usuario.ciudad = v.clone();
            aplicados += 1;
        }
        if let Some(v) = self.inactivo {
            usuario.inactivo = v;
            aplicados += 1;
        }
        if let Some(v) = self.rol {
            usuario.rol = v;
            aplicados += 1;
        }
        aplicados
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn usuario_base() -> Usuario {
        Usuario {
            usuario_id: Uuid::new_v4(),
            nombres: "Jane".into(),
            apellidos: "Doe".into(),
            correo: "jdoe@example.com".into(),
            contra: "hash".into(),
            pais: "Colombia".into(),
            ciudad: "Betulia".into(),
            inactivo: false,
            rol: Rol::User,
        }
    }

    #[test]
    fn aplica_solo_campos_presentes() {
        let mut usuario = usuario_base();
        let patch = ActualizarUsuario {
            pais: Some("Peru".into()),
            ..Default::default()
        };
        assert_eq!(patch.aplicar(&mut usuario), 1);
        assert_eq!(usuario.pais, "Peru");
        // everything else keeps its prior value
        assert_eq!(usuario.nombres, "Jane");
        assert_eq!(usuario.correo, "jdoe@example.com");
        assert_eq!(usuario.ciudad, "Betulia");
        assert!(!usuario.inactivo);
        assert_eq!(usuario.rol, Rol::User);
    }

    #[test]
    fn patch_vacio_no_aplica_nada() {
        let mut usuario = usuario_base();
        let original = usuario.clone();
        assert_eq!(ActualizarUsuario::default().aplicar(&mut usuario), 0);
        assert_eq!(usuario.correo, original.correo);
        assert_eq!(usuario.pais, original.pais);
    }

    #[test]
    fn aplica_varios_campos() {
        let mut usuario = usuario_base();
        let patch = ActualizarUsuario {
            inactivo: Some(true),
            rol: Some(Rol::Admin),
            ..Default::default()
        };
        assert_eq!(patch.aplicar(&mut usuario), 2);
        assert!(usuario.inactivo);
        assert_eq!(usuario.rol, Rol::Admin);
    }
}
