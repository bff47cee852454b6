//! Konversi API Server binary
//!
//! HTTP REST API for student records and score conversion.

use clap::Parser;
use konversi_nilai::api::{run_api_server, server::ApiConfig};
use konversi_nilai::types::ConversionRange;

#[derive(Parser, Debug)]
#[command(name = "konversi-server")]
#[command(version)]
#[command(about = "Konversi API Server - student records and score conversion over HTTP")]
#[command(long_about = r#"
Konversi API Server

Student records (kept in memory):
  - GET    /siswa?q=&page=&per_page=  - Search and page through students
  - POST   /siswa                     - Create a student
  - GET    /siswa/:id                 - Get a student
  - PUT    /siswa/:id                 - Update a student
  - DELETE /siswa/:id                 - Delete a student

Conversion:
  - POST /api/v1/convert  - Rescale numbers into [min, max]
  - POST /api/v1/import   - Read records from an uploaded workbook
  - POST /api/v1/export   - Convert records, download hasil_konversi.xlsx

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  konversi-server                           # Start on localhost:8080
  konversi-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/convert \
    -H "Content-Type: application/json" \
    -d '{"input": "60, 75, 90", "min": 85, "max": 95}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "KONVERSI_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "KONVERSI_PORT")]
    port: u16,

    /// Default lower bound when a request names none
    #[arg(long, default_value = "85", env = "KONVERSI_MIN", allow_hyphen_values = true)]
    min: i64,

    /// Default upper bound when a request names none
    #[arg(long, default_value = "95", env = "KONVERSI_MAX", allow_hyphen_values = true)]
    max: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "konversi_server=info,konversi_nilai=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        default_range: ConversionRange::new(args.min, args.max),
    };

    run_api_server(config).await
}
