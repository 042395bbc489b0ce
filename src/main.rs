fn main() -> anyhow::Result<()> {
    gift_giver::cli::run()
}
