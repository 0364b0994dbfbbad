mod project_file;
mod routes;
mod ws;
