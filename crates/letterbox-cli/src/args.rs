use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "letterbox")]
#[command(
    about = "Browse Letterboxd from the terminal",
    long_about = "Browse Letterboxd from the terminal: search movies, view profiles, \
                  diaries, watchlists and lists, and export them to CSV.\n\n\
                  Data directory: $LETTERBOX_PATH (default: platform data dir).\n\
                  Log filter: $LETTERBOX_LOG (default: letterbox=info)."
)]
#[command(version)]
pub struct Cli {}
