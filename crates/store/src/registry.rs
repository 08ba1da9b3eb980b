//! SQLite-backed registry store.
//!
//! One method per SQL statement; handlers compose them. All statements are
//! parameterized (`?N` placeholders) and run against a shared connection
//! pool. Cascades are issued as separate statements that each commit on
//! their own, matching the request-per-call model: there is no wrapping
//! transaction, and referential integrity is enforced by handler-level
//! existence checks rather than by the database.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::{FromRow, Row};
use tracing::instrument;

use roster_core::{Course, CourseDraft, Enrollment, Student, StudentDraft};

use crate::error::StoreError;

/// Handle to the registry database.
///
/// Cheap to clone (the pool is internally shared); constructed once in
/// `main` and injected into every handler. Opening the store creates the
/// database file if missing and brings up the schema.
///
/// The `foreign_keys` pragma stays off: enrollment references are
/// validated by lookups at the API boundary, and deletes cascade
/// explicitly.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    pool: SqlitePool,
}

impl RegistryStore {
    /// Open (and if necessary create) the registry database at `url`,
    /// e.g. `sqlite:roster.sqlite3`.
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::new("parse_database_url", e))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| StoreError::new("connect", e))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the three registry tables if they do not exist yet.
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS student (
                student_id  INTEGER PRIMARY KEY AUTOINCREMENT,
                roll_number TEXT NOT NULL UNIQUE,
                first_name  TEXT NOT NULL,
                last_name   TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("create_student_table", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS course (
                course_id          INTEGER PRIMARY KEY AUTOINCREMENT,
                course_code        TEXT NOT NULL UNIQUE,
                course_name        TEXT NOT NULL,
                course_description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("create_course_table", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS enrollment (
                enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id    INTEGER NOT NULL REFERENCES student (student_id),
                course_id     INTEGER NOT NULL REFERENCES course (course_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("create_enrollment_table", e))?;

        Ok(())
    }

    // ---- students ----

    /// Fetch a student by internal id.
    #[instrument(skip(self), err)]
    pub async fn student(&self, student_id: i64) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT student_id, roll_number, first_name, last_name
            FROM student
            WHERE student_id = ?1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("fetch_student", e))?;

        decode_optional::<StudentRow, Student>(row, "decode_student")
    }

    /// Fetch a student by roll number (the uniqueness lookup for POST).
    #[instrument(skip(self), err)]
    pub async fn student_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT student_id, roll_number, first_name, last_name
            FROM student
            WHERE roll_number = ?1
            "#,
        )
        .bind(roll_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("fetch_student_by_roll_number", e))?;

        decode_optional::<StudentRow, Student>(row, "decode_student")
    }

    /// Insert a new student, returning its assigned id.
    #[instrument(skip(self, draft), err)]
    pub async fn insert_student(&self, draft: &StudentDraft) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO student (roll_number, first_name, last_name)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&draft.roll_number)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("insert_student", e))?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite all mutable columns of a student.
    ///
    /// Returns the number of rows touched; 0 means the id does not exist.
    #[instrument(skip(self, draft), err)]
    pub async fn update_student(
        &self,
        student_id: i64,
        draft: &StudentDraft,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE student
            SET roll_number = ?1, first_name = ?2, last_name = ?3
            WHERE student_id = ?4
            "#,
        )
        .bind(&draft.roll_number)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(student_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("update_student", e))?;

        Ok(result.rows_affected())
    }

    /// Delete a student row. Enrollments are not touched here; callers
    /// cascade first via [`RegistryStore::delete_enrollments_for_student`].
    #[instrument(skip(self), err)]
    pub async fn delete_student(&self, student_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM student WHERE student_id = ?1")
            .bind(student_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("delete_student", e))?;

        Ok(result.rows_affected())
    }

    // ---- courses ----

    /// Fetch a course by internal id.
    #[instrument(skip(self), err)]
    pub async fn course(&self, course_id: i64) -> Result<Option<Course>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT course_id, course_code, course_name, course_description
            FROM course
            WHERE course_id = ?1
            "#,
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("fetch_course", e))?;

        decode_optional::<CourseRow, Course>(row, "decode_course")
    }

    /// Fetch a course by course code (the uniqueness lookup for POST).
    #[instrument(skip(self), err)]
    pub async fn course_by_code(&self, course_code: &str) -> Result<Option<Course>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT course_id, course_code, course_name, course_description
            FROM course
            WHERE course_code = ?1
            "#,
        )
        .bind(course_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("fetch_course_by_code", e))?;

        decode_optional::<CourseRow, Course>(row, "decode_course")
    }

    /// Insert a new course, returning its assigned id.
    #[instrument(skip(self, draft), err)]
    pub async fn insert_course(&self, draft: &CourseDraft) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO course (course_code, course_name, course_description)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&draft.course_code)
        .bind(&draft.course_name)
        .bind(&draft.course_description)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("insert_course", e))?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite all mutable columns of a course.
    ///
    /// Returns the number of rows touched; 0 means the id does not exist.
    #[instrument(skip(self, draft), err)]
    pub async fn update_course(
        &self,
        course_id: i64,
        draft: &CourseDraft,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE course
            SET course_code = ?1, course_name = ?2, course_description = ?3
            WHERE course_id = ?4
            "#,
        )
        .bind(&draft.course_code)
        .bind(&draft.course_name)
        .bind(&draft.course_description)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("update_course", e))?;

        Ok(result.rows_affected())
    }

    /// Delete a course row. Callers cascade enrollments first via
    /// [`RegistryStore::delete_enrollments_for_course`].
    #[instrument(skip(self), err)]
    pub async fn delete_course(&self, course_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM course WHERE course_id = ?1")
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("delete_course", e))?;

        Ok(result.rows_affected())
    }

    // ---- enrollments ----

    /// List all enrollments of one student, oldest first.
    #[instrument(skip(self), err)]
    pub async fn enrollments_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT enrollment_id, student_id, course_id
            FROM enrollment
            WHERE student_id = ?1
            ORDER BY enrollment_id ASC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::new("fetch_enrollments_for_student", e))?;

        let mut enrollments = Vec::with_capacity(rows.len());
        for row in rows {
            let decoded = EnrollmentRow::from_row(&row)
                .map_err(|e| StoreError::new("decode_enrollment", e))?;
            enrollments.push(decoded.into());
        }
        Ok(enrollments)
    }

    /// Find the exact link row between a student and a course.
    ///
    /// Duplicates are possible; the oldest link wins, which is the one the
    /// delete endpoint removes.
    #[instrument(skip(self), err)]
    pub async fn enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT enrollment_id, student_id, course_id
            FROM enrollment
            WHERE student_id = ?1 AND course_id = ?2
            ORDER BY enrollment_id ASC
            LIMIT 1
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::new("fetch_enrollment", e))?;

        decode_optional::<EnrollmentRow, Enrollment>(row, "decode_enrollment")
    }

    /// Insert a link row, returning its assigned id.
    #[instrument(skip(self), err)]
    pub async fn insert_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO enrollment (student_id, course_id)
            VALUES (?1, ?2)
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("insert_enrollment", e))?;

        Ok(result.last_insert_rowid())
    }

    /// Delete one link row by its id.
    #[instrument(skip(self), err)]
    pub async fn delete_enrollment(&self, enrollment_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM enrollment WHERE enrollment_id = ?1")
            .bind(enrollment_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("delete_enrollment", e))?;

        Ok(result.rows_affected())
    }

    /// Delete every link row of one student (student-delete cascade).
    #[instrument(skip(self), err)]
    pub async fn delete_enrollments_for_student(
        &self,
        student_id: i64,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM enrollment WHERE student_id = ?1")
            .bind(student_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("delete_enrollments_for_student", e))?;

        Ok(result.rows_affected())
    }

    /// Delete every link row referencing one course (course-delete cascade).
    #[instrument(skip(self), err)]
    pub async fn delete_enrollments_for_course(&self, course_id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM enrollment WHERE course_id = ?1")
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::new("delete_enrollments_for_course", e))?;

        Ok(result.rows_affected())
    }
}

fn decode_optional<R, T>(row: Option<SqliteRow>, operation: &'static str) -> Result<Option<T>, StoreError>
where
    R: for<'r> FromRow<'r, SqliteRow>,
    T: From<R>,
{
    row.map(|row| R::from_row(&row).map(T::from))
        .transpose()
        .map_err(|e| StoreError::new(operation, e))
}

// SQLx row types

#[derive(Debug)]
struct StudentRow {
    student_id: i64,
    roll_number: String,
    first_name: String,
    last_name: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for StudentRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(StudentRow {
            student_id: row.try_get("student_id")?,
            roll_number: row.try_get("roll_number")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        })
    }
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            student_id: row.student_id,
            roll_number: row.roll_number,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[derive(Debug)]
struct CourseRow {
    course_id: i64,
    course_code: String,
    course_name: String,
    course_description: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for CourseRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(CourseRow {
            course_id: row.try_get("course_id")?,
            course_code: row.try_get("course_code")?,
            course_name: row.try_get("course_name")?,
            course_description: row.try_get("course_description")?,
        })
    }
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            course_id: row.course_id,
            course_code: row.course_code,
            course_name: row.course_name,
            course_description: row.course_description,
        }
    }
}

#[derive(Debug)]
struct EnrollmentRow {
    enrollment_id: i64,
    student_id: i64,
    course_id: i64,
}

impl<'r> FromRow<'r, SqliteRow> for EnrollmentRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(EnrollmentRow {
            enrollment_id: row.try_get("enrollment_id")?,
            student_id: row.try_get("student_id")?,
            course_id: row.try_get("course_id")?,
        })
    }
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            enrollment_id: row.enrollment_id,
            student_id: row.student_id,
            course_id: row.course_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_temp() -> (TempDir, RegistryStore) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("registry.sqlite3").display());
        let store = RegistryStore::open(&url).await.expect("failed to open store");
        (dir, store)
    }

    fn student_draft(roll: &str, first: &str, last: Option<&str>) -> StudentDraft {
        StudentDraft {
            roll_number: roll.to_string(),
            first_name: first.to_string(),
            last_name: last.map(str::to_string),
        }
    }

    fn course_draft(code: &str, name: &str, description: Option<&str>) -> CourseDraft {
        CourseDraft {
            course_code: code.to_string(),
            course_name: name.to_string(),
            course_description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn student_crud_round_trip() {
        let (_dir, store) = open_temp().await;

        let id = store
            .insert_student(&student_draft("R1", "Ann", Some("Lee")))
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = store.student(id).await.unwrap().unwrap();
        assert_eq!(fetched.roll_number, "R1");
        assert_eq!(fetched.first_name, "Ann");
        assert_eq!(fetched.last_name.as_deref(), Some("Lee"));

        let by_roll = store.student_by_roll_number("R1").await.unwrap().unwrap();
        assert_eq!(by_roll.student_id, id);

        let touched = store
            .update_student(id, &student_draft("R2", "Anne", None))
            .await
            .unwrap();
        assert_eq!(touched, 1);
        let updated = store.student(id).await.unwrap().unwrap();
        assert_eq!(updated.roll_number, "R2");
        assert_eq!(updated.last_name, None);

        assert_eq!(store.delete_student(id).await.unwrap(), 1);
        assert!(store.student(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_missing_student_touches_no_rows() {
        let (_dir, store) = open_temp().await;
        let touched = store
            .update_student(99, &student_draft("R1", "Ann", None))
            .await
            .unwrap();
        assert_eq!(touched, 0);
    }

    #[tokio::test]
    async fn duplicate_roll_number_violates_unique_constraint() {
        let (_dir, store) = open_temp().await;
        store
            .insert_student(&student_draft("R1", "Ann", None))
            .await
            .unwrap();

        let err = store
            .insert_student(&student_draft("R1", "Ben", None))
            .await
            .unwrap_err();
        assert_eq!(err.operation(), "insert_student");
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn course_crud_round_trip() {
        let (_dir, store) = open_temp().await;

        let id = store
            .insert_course(&course_draft("CS101", "Systems", Some("Intro")))
            .await
            .unwrap();

        let fetched = store.course(id).await.unwrap().unwrap();
        assert_eq!(fetched.course_code, "CS101");
        assert_eq!(fetched.course_description.as_deref(), Some("Intro"));

        let by_code = store.course_by_code("CS101").await.unwrap().unwrap();
        assert_eq!(by_code.course_id, id);

        assert_eq!(
            store
                .update_course(id, &course_draft("CS102", "Systems II", None))
                .await
                .unwrap(),
            1
        );
        assert_eq!(store.delete_course(id).await.unwrap(), 1);
        assert!(store.course(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn enrollment_cascades_are_scoped() {
        let (_dir, store) = open_temp().await;

        let ann = store
            .insert_student(&student_draft("R1", "Ann", None))
            .await
            .unwrap();
        let ben = store
            .insert_student(&student_draft("R2", "Ben", None))
            .await
            .unwrap();
        let systems = store
            .insert_course(&course_draft("CS101", "Systems", None))
            .await
            .unwrap();
        let networks = store
            .insert_course(&course_draft("CS102", "Networks", None))
            .await
            .unwrap();

        store.insert_enrollment(ann, systems).await.unwrap();
        store.insert_enrollment(ann, networks).await.unwrap();
        store.insert_enrollment(ben, systems).await.unwrap();

        let anns = store.enrollments_for_student(ann).await.unwrap();
        assert_eq!(anns.len(), 2);
        assert!(anns.iter().all(|e| e.student_id == ann));

        let link = store.enrollment(ann, systems).await.unwrap().unwrap();
        assert_eq!(link.course_id, systems);
        assert!(store.enrollment(ben, networks).await.unwrap().is_none());

        // Course cascade removes only links to that course.
        assert_eq!(store.delete_enrollments_for_course(systems).await.unwrap(), 2);
        assert_eq!(store.enrollments_for_student(ann).await.unwrap().len(), 1);
        assert!(store.enrollments_for_student(ben).await.unwrap().is_empty());

        // Student cascade removes only that student's links.
        assert_eq!(store.delete_enrollments_for_student(ann).await.unwrap(), 1);
        assert!(store.enrollments_for_student(ann).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_links_delete_oldest_first() {
        let (_dir, store) = open_temp().await;

        let ann = store
            .insert_student(&student_draft("R1", "Ann", None))
            .await
            .unwrap();
        let systems = store
            .insert_course(&course_draft("CS101", "Systems", None))
            .await
            .unwrap();

        let first = store.insert_enrollment(ann, systems).await.unwrap();
        let second = store.insert_enrollment(ann, systems).await.unwrap();
        assert!(second > first);

        let link = store.enrollment(ann, systems).await.unwrap().unwrap();
        assert_eq!(link.enrollment_id, first);

        assert_eq!(store.delete_enrollment(first).await.unwrap(), 1);
        let link = store.enrollment(ann, systems).await.unwrap().unwrap();
        assert_eq!(link.enrollment_id, second);
    }

    #[tokio::test]
    async fn reopening_keeps_existing_rows() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("registry.sqlite3").display());

        let store = RegistryStore::open(&url).await.unwrap();
        let id = store
            .insert_student(&student_draft("R1", "Ann", None))
            .await
            .unwrap();
        drop(store);

        let reopened = RegistryStore::open(&url).await.unwrap();
        let student = reopened.student(id).await.unwrap().unwrap();
        assert_eq!(student.roll_number, "R1");
    }
}
