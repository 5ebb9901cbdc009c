use anyhow::Result;

fn main() -> Result<()> {
    share_my_repo::cli::run()
}
