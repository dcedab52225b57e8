use serde::Deserialize;

use crate::documentos::repo::Documento;

/// Partial update: only non-null fields overwrite the stored record.
#[derive(Debug, Default, Deserialize)]
pub struct ActualizarDocumento {
    pub tipo_documento: Option<String>,
    pub autor: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub categoria: Option<String>,
    pub stock: Option<i32>,
    pub precio: Option<i32>,
    pub editorial: Option<String>,
    pub idioma: Option<String>,
    pub paginas: Option<i32>,
    pub imagen: Option<String>,
}

impl ActualizarDocumento {
    pub fn aplicar(&self, documento: &mut Documento) -> usize {
        let mut aplicados = 0;
        macro_rules! campo {
            ($nombre:ident) => {
                if let Some(v) = &self.$nombre {
                    documento.$nombre = v.clone();
                    aplicados += 1;
                }
            };
        }
        campo!(tipo_documento);
        campo!(autor);
        campo!(titulo);
        campo!(descripcion);
        campo!(categoria);
        campo!(editorial);
        campo!(idioma);
        campo!(imagen);
        if let Some(v) = self.stock {
            documento.stock = v;
            aplicados += 1;
        }
        if let Some(v) = self.precio {
            documento.precio = v;
            aplicados += 1;
        }
        if let Some(v) = self.paginas {
            documento.paginas = v;
            aplicados += 1;
        }
        aplicados
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn documento_base() -> Documento {
        Documento {
            documento_id: Uuid::new_v4(),
            tipo_documento: "digital".into(),
            autor: "Robert C. Martin".into(),
            titulo: "clean code".into(),
            descripcion: "un libro para aprender codigo".into(),
            categoria: "desarrollo de software".into(),
            stock: 12,
            precio: 40,
            editorial: "betulia-editoriales".into(),
            idioma: "ingles".into(),
            paginas: 125,
            imagen: "/images/clean-code.png".into(),
        }
    }

    #[test]
    fn aplica_solo_campos_presentes() {
        let mut doc = documento_base();
        let patch = ActualizarDocumento {
            stock: Some(7),
            categoria: Some("ingenieria".into()),
            ..Default::default()
        };
        assert_eq!(patch.aplicar(&mut doc), 2);
        assert_eq!(doc.stock, 7);
        assert_eq!(doc.categoria, "ingenieria");
        assert_eq!(doc.titulo, "clean code");
        assert_eq!(doc.precio, 40);
    }

    #[test]
    fn patch_vacio_no_aplica_nada() {
        let mut doc = documento_base();
        assert_eq!(ActualizarDocumento::default().aplicar(&mut doc), 0);
    }
}
