use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rawat_catalog::{HospitalCatalog, RoomType};
use rawat_core::constants::{FETCH_DELAY_ENV, SUBMIT_DELAY_ENV};
use rawat_core::{
    CoreConfig, FormErrors, FormField, Patient, PatientFormData, PatientStore, RouterAction,
    SortDirection, SortField, SortState, SubmitOutcome, TablePage, TableStatus, ViewRouter,
    format_date, local_today, validate_patient_form,
};

const COLUMNS: [(&str, SortField); 6] = [
    ("Nama", SortField::Name),
    ("NIK", SortField::Nik),
    ("Diagnosa", SortField::Diagnosis),
    ("Tanggal Masuk", SortField::AdmissionDate),
    ("Dokter", SortField::Doctor),
    ("Ruangan", SortField::Room),
];

#[derive(Parser)]
#[command(name = "rawat-inap")]
#[command(about = "Inpatient registration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page of the patient table
    List {
        /// Filter by name or NIK
        #[arg(long, short)]
        query: Option<String>,
        /// Sort field (name, admission-date, nik, ...)
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// Register a new inpatient
    Add {
        #[command(flatten)]
        patient: PatientArgs,
        #[arg(long)]
        json: bool,
    },
    /// Validate patient data without registering it
    Validate {
        #[command(flatten)]
        patient: PatientArgs,
        #[arg(long)]
        json: bool,
    },
    /// List doctors
    Doctors {
        /// Only doctors in this department
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List rooms
    Rooms {
        /// Only rooms of this type (VIP, Kelas-1, Kelas-2, ICU)
        #[arg(long = "type")]
        room_type: Option<RoomType>,
        /// Only rooms on this floor
        #[arg(long)]
        floor: Option<u8>,
        #[arg(long)]
        json: bool,
    },
    /// Hospital catalog statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PatientArgs {
    #[arg(long, default_value = "")]
    name: String,
    /// 16-digit national identity number
    #[arg(long, default_value = "")]
    nik: String,
    #[arg(long, default_value = "")]
    diagnosis: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    admission_date: String,
    #[arg(long, default_value = "")]
    doctor: String,
    #[arg(long, default_value = "")]
    room: String,
}

impl From<PatientArgs> for PatientFormData {
    fn from(args: PatientArgs) -> Self {
        Self {
            name: args.name,
            nik: args.nik,
            diagnosis: args.diagnosis,
            admission_date: args.admission_date,
            doctor: args.doctor,
            room: args.room,
        }
    }
}

/// Entry point for the registration front end.
///
/// # Environment Variables
/// - `RAWAT_FETCH_DELAY_MS`: simulated patient fetch latency (default: 500)
/// - `RAWAT_SUBMIT_DELAY_MS`: simulated submission latency (default: 1000)
/// - `RUST_LOG`: log filter (default directive: `rawat=info`)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rawat=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var(FETCH_DELAY_ENV).ok(),
        std::env::var(SUBMIT_DELAY_ENV).ok(),
    )?);
    let catalog = HospitalCatalog::standard();

    match cli.command {
        Commands::List {
            query,
            sort,
            desc,
            page,
            json,
        } => {
            let store = PatientStore::new(cfg.clone())?;
            store.fetch_patients().await?;

            let mut router = ViewRouter::new(cfg, catalog);
            router.dispatch(RouterAction::ShowList)?;
            let Some(table) = router.table_mut() else {
                anyhow::bail!("patient table is not open");
            };

            if let Some(query) = query {
                table.set_query(query);
            }
            if let Some(field) = sort {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                table.set_sort(SortState::by(field, direction));
            }
            let total_pages = table.render(&store).pagination.total_pages;
            table.go_to_page(page, total_pages);

            print_table(&table.render(&store), table.sort(), json)?;
        }
        Commands::Add { patient, json } => {
            let store = PatientStore::new(cfg.clone())?;
            let mut router = ViewRouter::new(cfg, catalog);
            router.dispatch(RouterAction::AddPatient)?;

            let data = PatientFormData::from(patient);
            if let Some(form) = router.form_mut() {
                for field in FormField::ALL {
                    form.edit(field, data.get(field));
                }
            }

            tracing::info!("++ Submitting patient {}", data.name.trim());
            match router.submit_form(&store, local_today()).await? {
                SubmitOutcome::Admitted(patient) => {
                    print_admitted(&patient, json)?;
                    if let Some(table) = router.table_mut() {
                        print_table(&table.render(&store), table.sort(), json)?;
                    }
                }
                SubmitOutcome::Invalid { .. } => {
                    let Some(form) = router.form_mut() else {
                        anyhow::bail!("registration form is not open");
                    };
                    if let Some(notice) = form.notice() {
                        eprintln!("{}", notice);
                    }
                    print_errors(form.errors(), json)?;
                    anyhow::bail!("patient data is invalid");
                }
                SubmitOutcome::Failed(notice) => anyhow::bail!(notice),
                SubmitOutcome::Busy => anyhow::bail!("a submission is already in progress"),
            }
        }
        Commands::Validate { patient, json } => {
            let errors = validate_patient_form(&patient.into(), local_today());
            print_errors(&errors, json)?;
            if !errors.is_empty() {
                anyhow::bail!("patient data is invalid");
            }
        }
        Commands::Doctors { department, json } => {
            let doctors = match department.as_deref() {
                Some(department) => catalog.doctors_by_department(department),
                None => catalog.doctors().iter().collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&doctors)?);
            } else if doctors.is_empty() {
                println!("No doctors found.");
            } else {
                for d in doctors {
                    println!("{} | {} | {}", d.label, d.specialization, d.department);
                }
            }
        }
        Commands::Rooms {
            room_type,
            floor,
            json,
        } => {
            let rooms: Vec<_> = catalog
                .available_rooms()
                .iter()
                .filter(|r| room_type.is_none_or(|t| r.room_type == t))
                .filter(|r| floor.is_none_or(|f| r.floor == f))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rooms)?);
            } else if rooms.is_empty() {
                println!("No rooms found.");
            } else {
                for r in rooms {
                    println!(
                        "{} | {} | lantai {} | {} tempat tidur | {}",
                        r.label,
                        r.room_type,
                        r.floor,
                        r.capacity,
                        r.facilities.join(", ")
                    );
                }
            }
        }
        Commands::Stats { json } => {
            let stats = catalog.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dokter: {}", stats.total_doctors);
                println!("Ruangan: {}", stats.total_rooms);
                println!(
                    "  VIP: {}, ICU: {}, reguler: {}",
                    stats.vip_rooms, stats.icu_rooms, stats.regular_rooms
                );
                for (department, count) in &stats.doctors_by_department {
                    println!("  {}: {}", department, count);
                }
            }
        }
    }

    Ok(())
}

/// Column captions; sortable columns carry a direction marker.
fn table_header(sort: SortState) -> String {
    COLUMNS
        .iter()
        .map(|(label, field)| {
            if !SortField::TABLE_COLUMNS.contains(field) {
                return label.to_string();
            }
            let marker = match (sort.field, sort.direction) {
                (Some(f), SortDirection::Asc) if f == *field => "↑",
                (Some(f), SortDirection::Desc) if f == *field => "↓",
                _ => "↕",
            };
            format!("{} {}", label, marker)
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn print_table(page: &TablePage, sort: SortState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    match page.status {
        TableStatus::Loading => println!("Memuat data pasien..."),
        TableStatus::NoPatients => println!("Belum ada data pasien."),
        TableStatus::NoSearchResults => {
            println!("Tidak ada pasien yang sesuai dengan pencarian.")
        }
        TableStatus::Rows => {
            println!("{}", table_header(sort));
            for p in &page.rows {
                println!(
                    "{} | {} | {} | {} | {} | {}",
                    p.name,
                    p.nik,
                    p.diagnosis,
                    format_date(&p.admission_date),
                    p.doctor,
                    p.room
                );
            }
            println!("{}", page.summary());
            if page.pagination.is_visible() {
                let pages: Vec<String> = page
                    .pagination
                    .visible_pages()
                    .iter()
                    .map(|n| {
                        if *n == page.pagination.current_page {
                            format!("[{}]", n)
                        } else {
                            n.to_string()
                        }
                    })
                    .collect();
                println!(
                    "Halaman {} dari {}: {}",
                    page.pagination.current_page,
                    page.pagination.total_pages,
                    pages.join(" ")
                );
            }
        }
    }
    Ok(())
}

fn print_admitted(patient: &Patient, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(patient)?);
    } else {
        println!("Pasien {} berhasil didaftarkan (ID: {})", patient.name, patient.id);
    }
    Ok(())
}

fn print_errors(errors: &FormErrors, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(errors)?);
    } else if errors.is_empty() {
        println!("Data pasien valid.");
    } else {
        for (field, message) in errors.iter() {
            println!("{}: {}", field.label(), message);
        }
    }
    Ok(())
}
