mod projects;

pub use projects::PostgresProjectRepository;
