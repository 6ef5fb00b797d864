use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input(version: gxt_archive::Version) -> gxt_archive::Archive {
    let tables = if version.has_multiple_tables() { 8 } else { 1 };
    (0..tables)
        .map(|t| {
            let name = if t == 0 {
                gxt_archive::MAIN_TABLE.to_string()
            } else {
                format!("TAB{t}")
            };
            let table = (0..2000)
                .map(|i| (format!("K{t}_{i}"), format!("Text number {i} of table {t}")))
                .collect::<gxt_archive::Table>();
            (name, table)
        })
        .collect()
}

pub mod write {
    use divan::Bencher;
    use gxt_archive::{GxtWriter, GxtWriterOptions, Version};

    #[divan::bench(args = [Version::Gta3, Version::ViceCity, Version::SanAndreas, Version::Gta4])]
    fn to_bytes(bencher: Bencher, version: Version) {
        let archive = super::get_input(version);
        let writer = GxtWriter::new(version, GxtWriterOptions::default());
        bencher.bench_local(|| {
            divan::black_box(writer.to_bytes(&archive).unwrap());
        });
    }
}

pub mod read {
    use divan::Bencher;
    use gxt_archive::{GxtReader, GxtWriter, GxtWriterOptions, Version};

    #[divan::bench(args = [Version::Gta3, Version::ViceCity, Version::SanAndreas, Version::Gta4])]
    fn read_archive(bencher: Bencher, version: Version) {
        let data = GxtWriter::new(version, GxtWriterOptions::default())
            .to_bytes(&super::get_input(version))
            .unwrap();
        bencher.bench_local(|| {
            let reader = GxtReader::new(&data).unwrap();
            divan::black_box(reader.read_archive().unwrap());
        });
    }
}
