//! The `dropgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("tasks")?;
    let example_path = std::path::Path::new("tasks/example.toml");
    if example_path.exists() {
        println!("tasks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TASK)?;
        println!("Created tasks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit tasks/example.toml with your elements and drop zones");
    println!("  2. Run: dropgrade validate --task tasks/example.toml");
    println!("  3. Run: dropgrade grade --task tasks/example.toml --place 0:0 --place 1:1");

    Ok(())
}

const EXAMPLE_TASK: &str = r#"title = "Example: planets and moons"

[settings]
size = { width = 620, height = 310 }

[behaviour]
try_again = true
reset_placements_on_retry = false

# Drop zones get ids 0, 1, ... in file order.
[[drop_zones]]
label = "Planets"
show_label = true
correct_elements = [0, 1]
x = 5
y = 5
width = 16
height = 10

[[drop_zones]]
label = "Moons"
show_label = true
correct_elements = [2]
x = 55
y = 5
width = 16
height = 10

# Elements get ids 0, 1, ... in file order. An element without drop zones
# is static: it is shown but never moved or scored.
[[elements]]
drop_zones = [0, 1]
x = 10
y = 75
width = 5
height = 2

[[elements]]
drop_zones = [0, 1]
x = 30
y = 75
width = 5
height = 2

[[elements]]
drop_zones = [0, 1]
x = 50
y = 75
width = 5
height = 2

# A distractor: it may be dropped anywhere but belongs nowhere.
[[elements]]
drop_zones = [0, 1]
x = 70
y = 75
width = 5
height = 2

[[elements]]
x = 40
y = 50
width = 10
height = 2
"#;
