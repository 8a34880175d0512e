use airline::aircraft::Aircraft;
use airline::client::{Client, ClientKind, CompanySize};
use airline::fare::Season;
use airline::persistence::StorageFormat;
use airline::ticket::TicketLedger;
use airline::time::FlightDate;
use airline::Airline;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Parser)]
struct Args {
    /// Path to the saved airline
    #[arg(short, long, value_name = "FILE", default_value = "data/airline.json")]
    data: PathBuf,

    /// Storage format of the data file: json or plain
    #[arg(short, long, default_value = "json")]
    format: StorageFormat,

    /// Seed for ticket code generation
    #[arg(long)]
    seed: Option<u64>,

    /// Save to the data file when leaving the prompt
    #[arg(long)]
    save_on_exit: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

#[derive(Tabled)]
struct FlightRow {
    route: String,
    date: String,
    departure: String,
    aircraft: String,
    sold: String,
    season: String,
}

#[derive(Tabled)]
struct ClientRow {
    client: String,
    category: String,
    size: String,
    tickets: usize,
    pending: u64,
    spent: u64,
}

#[derive(Tabled)]
struct TicketRow {
    code: String,
    flight: String,
    client: String,
    fare: u64,
    used: bool,
}

fn paginate(content: String) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    pager.wait()?;
    Ok(())
}

fn print_table(mut table: Table, rows: usize) {
    if rows == 0 {
        println!("Nothing to show.");
        return;
    }
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows > 20 {
        if let Err(e) = paginate(table.to_string()) {
            log::warn!("pager unavailable: {}", e);
            println!("{}", table);
        }
    } else {
        println!("{}", table);
    }
}

fn list(airline: &Airline, what: &str) {
    match what {
        "r" | "routes" => {
            let mut routes = airline.routes().map(|r| r.as_ref()).collect::<Vec<_>>();
            routes.sort_by(|a, b| a.code.cmp(&b.code));
            print_table(Table::new(&routes), routes.len());
        }
        "a" | "aircraft" => {
            let mut aircraft = airline.aircraft().map(|a| a.as_ref()).collect::<Vec<_>>();
            aircraft.sort_by(|a, b| a.name.cmp(&b.name));
            print_table(Table::new(&aircraft), aircraft.len());
        }
        "p" | "airports" => {
            let mut airports = airline.airports().map(|a| a.as_ref()).collect::<Vec<_>>();
            airports.sort_by(|a, b| a.code.cmp(&b.code));
            print_table(Table::new(&airports), airports.len());
        }
        "c" | "clients" => {
            let mut clients = airline
                .clients()
                .map(|c| ClientRow {
                    client: c.id().to_string(),
                    category: c.kind().category().to_string(),
                    size: match c.kind() {
                        ClientKind::Corporate { size_tier, .. } => size_tier.to_string(),
                        ClientKind::Individual { .. } => String::new(),
                    },
                    tickets: c.ticket_codes().len(),
                    pending: c.pending_balance(airline.ledger()),
                    spent: c.total_spent(airline.ledger()),
                })
                .collect::<Vec<_>>();
            clients.sort_by(|a, b| a.client.cmp(&b.client));
            let len = clients.len();
            print_table(Table::new(clients), len);
        }
        "t" | "tickets" => {
            let tickets = airline
                .tickets()
                .map(|t| TicketRow {
                    code: t.code.to_string(),
                    flight: t.flight.to_string(),
                    client: t.client.to_string(),
                    fare: t.fare,
                    used: t.is_used(),
                })
                .collect::<Vec<_>>();
            let len = tickets.len();
            print_table(Table::new(tickets), len);
        }
        _ => {
            let flights = airline
                .flights()
                .iter()
                .map(|f| FlightRow {
                    route: f.route.code.to_string(),
                    date: f.date.to_string(),
                    departure: format!("{} {} -> {} {}", f.route.origin, f.route.departure_time, f.route.destination, f.route.arrival_time),
                    aircraft: f.aircraft.name.to_string(),
                    sold: format!("{}/{}", f.ticket_count(), f.capacity()),
                    season: Season::for_date(&f.date).to_string(),
                })
                .collect::<Vec<_>>();
            let len = flights.len();
            print_table(Table::new(flights), len);
        }
    }
}

fn usage(text: &str) -> Result<(), Box<dyn Error>> {
    println!("Usage: {}", text);
    Ok(())
}

fn execute(airline: &mut Airline, args: &Args, parts: &[&str]) -> Result<(), Box<dyn Error>> {
    match parts {
        ["ls"] => list(airline, "f"),
        ["ls", what] => list(airline, what),
        ["airport", code, lat, lon, name @ ..] if !name.is_empty() => {
            airline.register_airport(code, &name.join(" "), lat.parse()?, lon.parse()?)?;
            println!("Registered airport {}.", code);
        }
        ["airport", ..] => return usage("airport <code> <lat> <lon> <name>"),
        ["aircraft", name, capacity] => {
            airline.add_aircraft(Aircraft::new(name, capacity.parse()?)?)?;
            println!("Added aircraft {}.", name);
        }
        ["aircraft", ..] => return usage("aircraft <name> <seats>"),
        ["route", code, origin, destination, dep, arr] => {
            let route = airline.add_route(code, origin, destination, dep.parse()?, arr.parse()?)?;
            println!("Added route {} ({} km).", code, route.distance_km());
        }
        ["route", ..] => return usage("route <code> <origin> <destination> <HHMM> <HHMM>"),
        ["individual", name] => {
            airline.add_client(Client::individual(name))?;
            println!("Added client {}.", name);
        }
        ["individual", ..] => return usage("individual <name>"),
        ["corporate", name, size] => {
            airline.add_client(Client::corporate(name, size.parse::<CompanySize>()?))?;
            println!("Added client {}.", name);
        }
        ["corporate", ..] => return usage("corporate <company> <small|medium|large>"),
        ["schedule", date, route, aircraft] => {
            let flight = airline.schedule_flight(date.parse()?, route, aircraft)?;
            println!("Scheduled {}.", flight.key());
        }
        ["schedule", ..] => return usage("schedule <YYYY-MM-DD> <route> <aircraft>"),
        ["quote", client, date, route] => {
            let q = airline.quote(client, date.parse()?, route)?;
            println!(
                "{} km: base {} - {}% + tax {} = {} per ticket",
                q.distance_km, q.base, q.discount_percent, q.tax, q.total
            );
        }
        ["quote", ..] => return usage("quote <client> <YYYY-MM-DD> <route>"),
        ["sell", client, date, route, quantity] => {
            let total = airline.sell_tickets(client, date.parse()?, route, quantity.parse()?)?;
            println!("Sold {} tickets for {}.", quantity, total.to_string().green());
        }
        ["sell", ..] => return usage("sell <client> <YYYY-MM-DD> <route> <quantity>"),
        ["complete", date, route] => {
            let marked = airline.complete_flight(date.parse()?, route);
            println!("Flight completed. {} tickets marked as used.", marked);
        }
        ["complete", ..] => return usage("complete <YYYY-MM-DD> <route>"),
        ["use", client, date, route] => {
            let date: FlightDate = date.parse()?;
            let marked = airline.use_client_tickets(client, date, route)?;
            println!("{} tickets marked as used.", marked);
        }
        ["use", ..] => return usage("use <client> <YYYY-MM-DD> <route>"),
        ["balance", client] => {
            println!(
                "Pending balance of {}: {} (spent {}).",
                client,
                airline.pending_balance(client)?.to_string().yellow(),
                airline.total_spent(client)?
            );
        }
        ["balance", ..] => return usage("balance <client>"),
        ["save"] => {
            airline.save_to_file(&args.data, args.format)?;
            println!("Saved to {}.", args.data.display());
        }
        ["save", path] => {
            airline.save_to_file(path, args.format)?;
            println!("Saved to {}.", path);
        }
        ["help"] | ["?"] => {
            println!("\nAvailable Commands:");
            println!("  ls [what]                            - List flights, or r(outes), a(ircraft), p (airports), c(lients), t(ickets)");
            println!("  airport <code> <lat> <lon> <name>    - Register an airport");
            println!("  aircraft <name> <seats>              - Add an aircraft");
            println!("  route <code> <from> <to> <dep> <arr> - Add a route, times as HHMM");
            println!("  individual <name>                    - Add an individual client");
            println!("  corporate <name> <size>              - Add a corporate client (small, medium, large)");
            println!("  schedule <date> <route> <aircraft>   - Schedule a flight");
            println!("  quote <client> <date> <route>        - Show the fare of one ticket");
            println!("  sell <client> <date> <route> <n>     - Sell <n> tickets");
            println!("  complete <date> <route>              - Mark every ticket of a flight as used");
            println!("  use <client> <date> <route>          - Mark one client's tickets of a flight as used");
            println!("  balance <client>                     - Show unused ticket value");
            println!("  save [file]                          - Save the airline");
            println!("  help / ?                             - Show this help menu");
            println!("  exit / quit                          - Leave the prompt\n");
        }
        [cmd, ..] => println!("Unknown command: {}", cmd),
        [] => {}
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let ledger = args.seed.map(TicketLedger::with_seed).unwrap_or_default();
    let mut airline = if args.data.exists() {
        let airline = Airline::load_from_file_with_ledger(&args.data, args.format, ledger)?;
        println!("Loaded airline from {}", args.data.display());
        airline
    } else {
        println!("No data at {}, starting an empty airline", args.data.display());
        Airline::with_ledger(ledger)
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: [
            "ls", "airport", "aircraft", "route", "individual", "corporate", "schedule", "quote",
            "sell", "complete", "use", "balance", "save", "help", "exit",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                if matches!(parts[0], "exit" | "quit") {
                    break;
                }
                if let Err(e) = execute(&mut airline, &args, &parts) {
                    println!("{}", format!("Error: {}", e).red());
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    if args.save_on_exit {
        airline.save_to_file(&args.data, args.format)?;
        println!("Saved to {}", args.data.display());
    }
    Ok(())
}
