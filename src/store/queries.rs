//! Static statement table. Read-only; dynamic filters and patches come from `crate::sql`.

pub const APARTMENTS: &str = "apartamentos";
pub const RESERVATIONS: &str = "reservas";
pub const IMAGES: &str = "imagenes";

pub const INSERT_APARTMENT: &str = r#"INSERT INTO "apartamentos" ("direccion", "ciudad", "pais", "codigo_postal", "superficie", "habitaciones", "baños", "precio", "estado", "descripcion", "propietario_id") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#;
pub const SELECT_APARTMENT_BY_ID: &str = r#"SELECT * FROM "apartamentos" WHERE "id" = ?"#;
pub const SELECT_APARTMENT_BY_ADDRESS: &str = r#"SELECT * FROM "apartamentos" WHERE "direccion" = ? LIMIT 1"#;
pub const DELETE_APARTMENT: &str = r#"DELETE FROM "apartamentos" WHERE "id" = ?"#;

/// Insert a reservation only if its apartment exists and holds no reservation in one of
/// `active_statuses` statuses. Binds the five insert values and the apartment id; with
/// active statuses, the apartment id again followed by the statuses.
pub fn insert_reservation_if_free(active_statuses: usize) -> String {
    let mut sql = String::from(
        r#"INSERT INTO "reservas" ("apartamento_id", "usuario_id", "fecha_inicio", "fecha_fin", "estado") SELECT ?, ?, ?, ?, ? WHERE EXISTS (SELECT 1 FROM "apartamentos" WHERE "id" = ?)"#,
    );
    if active_statuses > 0 {
        let placeholders = vec!["?"; active_statuses].join(", ");
        sql.push_str(&format!(
            r#" AND NOT EXISTS (SELECT 1 FROM "reservas" WHERE "apartamento_id" = ? AND "estado" IN ({}))"#,
            placeholders
        ));
    }
    sql
}

pub const SELECT_RESERVATION_BY_ID: &str = r#"SELECT * FROM "reservas" WHERE "id" = ?"#;
pub const DELETE_RESERVATION: &str = r#"DELETE FROM "reservas" WHERE "id" = ?"#;

pub const INSERT_IMAGE: &str = r#"INSERT INTO "imagenes" ("apartamento_id", "imagen", "descripcion") VALUES (?, ?, ?)"#;
pub const SELECT_IMAGE_BY_ID: &str = r#"SELECT * FROM "imagenes" WHERE "id" = ?"#;
pub const SELECT_IMAGE_BY_CONTENT: &str = r#"SELECT * FROM "imagenes" WHERE "apartamento_id" = ? AND "imagen" = ? LIMIT 1"#;
pub const SELECT_IMAGES_BY_APARTMENT: &str = r#"SELECT * FROM "imagenes" WHERE "apartamento_id" = ? ORDER BY "id""#;
pub const DELETE_IMAGE: &str = r#"DELETE FROM "imagenes" WHERE "id" = ?"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn inserts_bind_one_value_per_column() {
        assert_eq!(placeholders(INSERT_APARTMENT), 11);
        assert_eq!(placeholders(INSERT_IMAGE), 3);
    }

    #[test]
    fn guarded_reservation_insert_binds_both_conditions() {
        let sql = insert_reservation_if_free(2);
        assert_eq!(placeholders(&sql), 5 + 2 + 2);
        assert!(sql.contains(r#""estado" IN (?, ?)"#));
        assert_eq!(placeholders(&insert_reservation_if_free(0)), 5 + 1);
    }

    #[test]
    fn statements_target_their_tables() {
        assert!(INSERT_APARTMENT.contains(&format!("\"{}\"", APARTMENTS)));
        assert!(DELETE_RESERVATION.contains(&format!("\"{}\"", RESERVATIONS)));
        assert!(DELETE_IMAGE.contains(&format!("\"{}\"", IMAGES)));
    }
}
