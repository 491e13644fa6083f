#[tokio::main]
async fn main() -> anyhow::Result<()> {
    supabase_password_reset::cli::run_with_sys_args().await
}
