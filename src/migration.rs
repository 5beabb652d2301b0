//! Create the three tables and their indexes. CHECK lists and defaults come from the status catalog.
//! Idempotent (IF NOT EXISTS); an existing table keeps the CHECK it was created with.

use crate::config::{StatusCatalog, StatusSet};
use crate::error::AppError;
use crate::store::Store;

/// SQL string literal.
fn literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn status_check(set: &StatusSet) -> String {
    let values: Vec<String> = set.values.iter().map(|v| literal(v)).collect();
    format!(
        "\"estado\" TEXT CHECK(\"estado\" IN ({})) DEFAULT {}",
        values.join(", "),
        literal(&set.default)
    )
}

/// DDL statements in dependency order.
pub fn schema_statements(catalog: &StatusCatalog) -> Vec<String> {
    vec![
        format!(
            r#"CREATE TABLE IF NOT EXISTS "apartamentos" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "direccion" TEXT NOT NULL,
    "ciudad" TEXT NOT NULL,
    "pais" TEXT NOT NULL,
    "codigo_postal" TEXT NOT NULL,
    "superficie" REAL NOT NULL CHECK("superficie" > 0),
    "habitaciones" INTEGER NOT NULL,
    "baños" INTEGER NOT NULL,
    "precio" REAL NOT NULL CHECK("precio" >= 0),
    {},
    "descripcion" TEXT,
    "propietario_id" INTEGER NOT NULL
)"#,
            status_check(&catalog.apartment)
        ),
        r#"CREATE UNIQUE INDEX IF NOT EXISTS "apartamentos_direccion_key" ON "apartamentos" ("direccion")"#.to_string(),
        format!(
            r#"CREATE TABLE IF NOT EXISTS "reservas" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "apartamento_id" INTEGER NOT NULL,
    "usuario_id" INTEGER NOT NULL,
    "fecha_inicio" TEXT NOT NULL,
    "fecha_fin" TEXT NOT NULL,
    {},
    FOREIGN KEY ("apartamento_id") REFERENCES "apartamentos"("id") ON DELETE CASCADE
)"#,
            status_check(&catalog.reservation)
        ),
        r#"CREATE INDEX IF NOT EXISTS "reservas_apartamento_id_idx" ON "reservas" ("apartamento_id")"#.to_string(),
        r#"CREATE TABLE IF NOT EXISTS "imagenes" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "apartamento_id" INTEGER NOT NULL,
    "imagen" TEXT NOT NULL,
    "descripcion" TEXT NOT NULL,
    FOREIGN KEY ("apartamento_id") REFERENCES "apartamentos"("id") ON DELETE CASCADE
)"#
        .to_string(),
        r#"CREATE UNIQUE INDEX IF NOT EXISTS "imagenes_apartamento_imagen_key" ON "imagenes" ("apartamento_id", "imagen")"#
            .to_string(),
    ]
}

pub async fn apply_schema(store: &Store, catalog: &StatusCatalog) -> Result<(), AppError> {
    for sql in schema_statements(catalog) {
        store.run(&sql, &[]).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_catalog;

    #[test]
    fn check_lists_follow_the_catalog() {
        let mut catalog = default_catalog();
        catalog.apartment.values.push("en_obras".into());
        let ddl = schema_statements(&catalog);
        assert!(ddl[0].contains(
            r#"CHECK("estado" IN ('disponible', 'alquilado', 'reservado', 'inactivo', 'en_obras')) DEFAULT 'disponible'"#
        ));
        assert!(ddl[2].contains("DEFAULT 'pendiente'"));
    }

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(literal("o'clock"), "'o''clock'");
    }
}
