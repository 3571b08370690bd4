/// SQL statements for creating the transcripts schema.
pub const CREATE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS students (
    student_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    overall_average REAL,
    approved_credits INTEGER,
    updated_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS courses (
    course_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    credits INTEGER,
    is_elective INTEGER NOT NULL DEFAULT 0,
    elective_type TEXT,
    min_credits_required INTEGER
);

CREATE TABLE IF NOT EXISTS requires (
    course_id TEXT NOT NULL,
    required_id TEXT NOT NULL,
    UNIQUE(course_id, required_id)
);

CREATE TABLE IF NOT EXISTS took (
    id INTEGER PRIMARY KEY,
    student_id TEXT NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
    course_id TEXT NOT NULL,
    semester_taken TEXT NOT NULL,
    grade REAL NOT NULL,
    UNIQUE(student_id, course_id, semester_taken)
);

CREATE TABLE IF NOT EXISTS documents (
    hash TEXT PRIMARY KEY,
    student_id TEXT NOT NULL,
    imported_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_took_student ON took(student_id);
CREATE INDEX IF NOT EXISTS idx_took_course ON took(course_id);
CREATE INDEX IF NOT EXISTS idx_requires_course ON requires(course_id);
";
