use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book record as stored in the demo collection. The schema is owned by the
/// database; this struct only exists so seeding can insert well-formed data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
    pub in_stock: bool,
    pub pages: i32,
    pub publisher: String,
}

impl Book {
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        published_year: i32,
        price: f64,
        in_stock: bool,
        pages: i32,
        publisher: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year,
            price,
            in_stock,
            pages,
            publisher: publisher.to_string(),
        }
    }
}

/// Curated seed data. The set deliberately covers every title, author, genre
/// and year range the query tour filters on, so a freshly seeded collection
/// produces non-empty output for each step.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new(
            "To Kill a Mockingbird",
            "Harper Lee",
            "Fiction",
            1960,
            12.99,
            true,
            336,
            "J.B. Lippincott & Co.",
        ),
        Book::new(
            "1984",
            "George Orwell",
            "Dystopian",
            1949,
            10.99,
            true,
            328,
            "Secker & Warburg",
        ),
        Book::new(
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "Fiction",
            1925,
            9.99,
            true,
            180,
            "Charles Scribner's Sons",
        ),
        Book::new(
            "Brave New World",
            "Aldous Huxley",
            "Dystopian",
            1932,
            11.50,
            false,
            311,
            "Chatto & Windus",
        ),
        Book::new(
            "The Hobbit",
            "J.R.R. Tolkien",
            "Fantasy",
            1937,
            14.99,
            true,
            310,
            "George Allen & Unwin",
        ),
        Book::new(
            "The Lord of the Rings",
            "J.R.R. Tolkien",
            "Fantasy",
            1954,
            19.99,
            true,
            1178,
            "Allen & Unwin",
        ),
        Book::new(
            "Animal Farm",
            "George Orwell",
            "Political Satire",
            1945,
            8.50,
            false,
            112,
            "Secker & Warburg",
        ),
        Book::new(
            "Pride and Prejudice",
            "Jane Austen",
            "Romance",
            1813,
            7.99,
            true,
            432,
            "T. Egerton",
        ),
        Book::new(
            "Harry Potter and the Philosopher's Stone",
            "J.K. Rowling",
            "Fantasy",
            1997,
            24.99,
            true,
            223,
            "Bloomsbury",
        ),
        Book::new(
            "Harry Potter and the Chamber of Secrets",
            "J.K. Rowling",
            "Fantasy",
            1998,
            22.99,
            true,
            251,
            "Bloomsbury",
        ),
        Book::new(
            "Clean Code",
            "Robert C. Martin",
            "Programming",
            2008,
            32.50,
            true,
            464,
            "Prentice Hall",
        ),
        Book::new(
            "The Pragmatic Programmer",
            "Andrew Hunt",
            "Programming",
            2019,
            39.99,
            true,
            352,
            "Addison-Wesley",
        ),
        Book::new(
            "The Rust Programming Language",
            "Steve Klabnik",
            "Programming",
            2023,
            39.95,
            true,
            560,
            "No Starch Press",
        ),
        Book::new(
            "Project Hail Mary",
            "Andy Weir",
            "Science Fiction",
            2021,
            16.99,
            true,
            496,
            "Ballantine Books",
        ),
        Book::new(
            "Klara and the Sun",
            "Kazuo Ishiguro",
            "Science Fiction",
            2021,
            14.50,
            false,
            320,
            "Faber and Faber",
        ),
    ]
}

/// Per-step entry in the serialized run report.
#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    pub name: String,
    pub section: String,
    pub summary: String,
    pub document_count: usize,
    pub duration_ms: u64,
}

/// The serializable result of a complete run, written by the report sink.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub execution_id: String,
    pub started_at: DateTime<Utc>,
    pub executed_steps: usize,
    pub total_documents: usize,
    pub total_duration_ms: u64,
    pub steps: Vec<StepSummary>,
}
