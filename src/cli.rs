// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Gigview v{} - Concert listing viewer",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {binary_name} [OPTIONS]              Fetch the feed and print the listing");
    println!("    {binary_name} add [OPTIONS]          Fetch, filter, and add matches to My List");
    println!("    {binary_name} remove [OPTIONS]       Remove matching events from My List");
    println!("    {binary_name} list                   Show My List");
    println!("    {binary_name} export                 Print My List as iCalendar to stdout");
    println!("    {binary_name} --help                 Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    --artist <text>       Keep rows whose artist contains <text>.");
    println!("    --genre <text>        Keep rows whose genre contains <text>.");
    println!("    --venue <text>        Keep rows whose venue contains <text>.");
    println!("    --promoter <text>     Keep rows whose promoter contains <text>.");
    println!("    --from <YYYY-MM-DD>   Keep rows on or after this date.");
    println!("    --to <YYYY-MM-DD>     Keep rows on or before this date.");
    println!();
    println!("EXAMPLES:");
    println!("    {binary_name} --genre punk --from 2025-11-01");
    println!("    {binary_name} add --artist \"sun ra\"");
    println!("    {binary_name} export > my-gigs.ics");
}
