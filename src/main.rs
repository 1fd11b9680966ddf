fn main() -> anyhow::Result<()> {
    labelscrape::cli::run()
}
