use sentiment_dashboard::error::DashboardError;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    sentiment_dashboard::app::run().await
}
