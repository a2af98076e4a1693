fn main() -> anyhow::Result<()> {
    chat_record_viewer::cli::run()
}
