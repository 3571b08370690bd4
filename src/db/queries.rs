use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use crate::error::Result;
use crate::models::{CatalogCourse, StoredStudent, TookRecord};

use super::Database;

impl Database {
    // ─── Students ───

    /// Insert a student, or refresh the summary fields of an existing one.
    /// The name is only written on creation.
    pub fn upsert_student(
        &self,
        student_id: &str,
        name: &str,
        overall_average: Option<f64>,
        approved_credits: Option<u32>,
    ) -> Result<()> {
        self.conn().execute(
            "INSERT INTO students (student_id, name, overall_average, approved_credits)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(student_id) DO UPDATE SET
                overall_average = COALESCE(?3, overall_average),
                approved_credits = COALESCE(?4, approved_credits),
                updated_at = CURRENT_TIMESTAMP",
            params![student_id, name, overall_average, approved_credits],
        )?;
        Ok(())
    }

    /// Get a student by id.
    pub fn get_student(&self, student_id: &str) -> Result<Option<StoredStudent>> {
        let student = self
            .conn()
            .query_row(
                "SELECT student_id, name, overall_average, approved_credits
                 FROM students WHERE student_id = ?1",
                params![student_id],
                |row| {
                    Ok(StoredStudent {
                        student_id: row.get(0)?,
                        name: row.get(1)?,
                        overall_average: row.get(2)?,
                        approved_credits: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(student)
    }

    // ─── Took relationships ───

    /// Store a grade, keyed on (student, course, semester key).
    pub fn upsert_took(
        &self,
        student_id: &str,
        course_id: &str,
        semester_taken: &str,
        grade: f64,
    ) -> Result<()> {
        self.conn().execute(
            "INSERT INTO took (student_id, course_id, semester_taken, grade)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(student_id, course_id, semester_taken) DO UPDATE SET grade = ?4",
            params![student_id, course_id, semester_taken, grade],
        )?;
        Ok(())
    }

    /// All relationships of a student, ordered by semester key then course.
    pub fn get_took_for_student(&self, student_id: &str) -> Result<Vec<TookRecord>> {
        let mut stmt = self.conn().prepare(
            "SELECT course_id, semester_taken, grade FROM took
             WHERE student_id = ?1 ORDER BY semester_taken, course_id",
        )?;
        let rows = stmt.query_map(params![student_id], |row| {
            Ok(TookRecord {
                course_id: row.get(0)?,
                semester_taken: row.get(1)?,
                grade: row.get(2)?,
            })
        })?;
        let mut took = Vec::new();
        for r in rows {
            took.push(r?);
        }
        Ok(took)
    }

    // ─── Imported documents ───

    /// Whether a document with this content hash was already imported.
    pub fn document_imported(&self, hash: &str) -> Result<bool> {
        let found = self
            .conn()
            .query_row(
                "SELECT 1 FROM documents WHERE hash = ?1",
                params![hash],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Remember an imported document.
    pub fn record_document(&self, hash: &str, student_id: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO documents (hash, student_id) VALUES (?1, ?2)
             ON CONFLICT(hash) DO UPDATE SET student_id = ?2, imported_at = CURRENT_TIMESTAMP",
            params![hash, student_id],
        )?;
        Ok(())
    }

    // ─── Catalog ───

    /// Insert or replace a catalog course (without its prerequisites).
    pub fn upsert_course(&self, course: &CatalogCourse) -> Result<()> {
        self.conn().execute(
            "INSERT INTO courses (course_id, name, credits, is_elective, elective_type, min_credits_required)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(course_id) DO UPDATE SET
                name = ?2, credits = ?3, is_elective = ?4, elective_type = ?5, min_credits_required = ?6",
            params![
                course.id,
                course.name,
                course.credits,
                course.elective,
                course.elective_type,
                course.min_credits_required,
            ],
        )?;
        Ok(())
    }

    /// Replace the prerequisite edges of a course. Returns the number stored.
    pub fn replace_requirements(&self, course_id: &str, required: &[String]) -> Result<usize> {
        self.conn()
            .execute("DELETE FROM requires WHERE course_id = ?1", params![course_id])?;
        let mut stored = 0;
        for req in required {
            stored += self.conn().execute(
                "INSERT OR IGNORE INTO requires (course_id, required_id) VALUES (?1, ?2)",
                params![course_id, req],
            )?;
        }
        Ok(stored)
    }

    /// All catalog courses with their prerequisite ids, ordered by id.
    pub fn get_all_courses(&self) -> Result<Vec<CatalogCourse>> {
        let mut requires: BTreeMap<String, Vec<String>> = BTreeMap::new();
        {
            let mut stmt = self.conn().prepare(
                "SELECT course_id, required_id FROM requires ORDER BY course_id, required_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            for r in rows {
                let (course, req) = r?;
                requires.entry(course).or_default().push(req);
            }
        }

        let mut stmt = self.conn().prepare(
            "SELECT course_id, name, credits, is_elective, elective_type, min_credits_required
             FROM courses ORDER BY course_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CatalogCourse {
                id: row.get(0)?,
                name: row.get(1)?,
                credits: row.get(2)?,
                elective: row.get(3)?,
                elective_type: row.get(4)?,
                min_credits_required: row.get(5)?,
                requires: Vec::new(),
            })
        })?;
        let mut courses = Vec::new();
        for r in rows {
            let mut course = r?;
            course.requires = requires.remove(&course.id).unwrap_or_default();
            courses.push(course);
        }
        Ok(courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn course(id: &str, requires: &[&str]) -> CatalogCourse {
        CatalogCourse {
            id: id.into(),
            name: format!("Curso {id}"),
            credits: Some(3),
            elective: false,
            elective_type: None,
            min_credits_required: None,
            requires: requires.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn student_name_set_on_create_only() {
        let db = db();
        db.upsert_student("1090123", "Ana Torres", Some(4.2), Some(96))
            .unwrap();
        db.upsert_student("1090123", "Otro Nombre", None, Some(100))
            .unwrap();
        let s = db.get_student("1090123").unwrap().unwrap();
        assert_eq!(s.name, "Ana Torres");
        assert_eq!(s.overall_average, Some(4.2));
        assert_eq!(s.approved_credits, Some(100));
    }

    #[test]
    fn missing_student_is_none() {
        assert!(db().get_student("nope").unwrap().is_none());
    }

    #[test]
    fn took_upsert_is_idempotent() {
        let db = db();
        db.upsert_student("1", "A", None, None).unwrap();
        db.upsert_took("1", "1155101", "2020-1", 2.5).unwrap();
        db.upsert_took("1", "1155101", "2020-1", 3.5).unwrap();
        db.upsert_took("1", "1155101", "2020-V", 4.0).unwrap();

        let took = db.get_took_for_student("1").unwrap();
        assert_eq!(took.len(), 2);
        assert_eq!(took[0].semester_taken, "2020-1");
        assert!((took[0].grade - 3.5).abs() < f64::EPSILON);
        assert_eq!(took[1].semester_taken, "2020-V");
    }

    #[test]
    fn documents_are_remembered() {
        let db = db();
        assert!(!db.document_imported("abc").unwrap());
        db.record_document("abc", "1").unwrap();
        assert!(db.document_imported("abc").unwrap());
    }

    #[test]
    fn courses_with_requirements() {
        let db = db();
        let c1 = course("1155101", &[]);
        let c2 = course("1155201", &["1155101"]);
        db.upsert_course(&c1).unwrap();
        db.upsert_course(&c2).unwrap();
        assert_eq!(db.replace_requirements(&c2.id, &c2.requires).unwrap(), 1);

        let courses = db.get_all_courses().unwrap();
        assert_eq!(courses, vec![c1, c2]);
    }

    #[test]
    fn replace_requirements_drops_old_edges() {
        let db = db();
        db.upsert_course(&course("2", &[])).unwrap();
        db.replace_requirements("2", &["1".into(), "1".into(), "3".into()])
            .unwrap();
        db.replace_requirements("2", &["4".into()]).unwrap();
        let courses = db.get_all_courses().unwrap();
        assert_eq!(courses[0].requires, ["4"]);
    }
}
