//! Widgets shipped with the blog.

use ecow::EcoString;

use super::{Category, ComponentDescriptor, PropSchema, PropType};

pub(super) fn components() -> Vec<ComponentDescriptor> {
    vec![
        fire_sim(),
        sphere(),
        css_artwork(),
        fire_sim_control(),
        fire_sim_2(),
        sphere_control(),
    ]
}

fn descriptor(
    name: &str,
    label: &str,
    description: &str,
    category: Category,
    consumes_context: bool,
    provides_context: &[&str],
    props: Vec<(&str, PropSchema)>,
) -> ComponentDescriptor {
    ComponentDescriptor {
        name: name.into(),
        label: label.into(),
        description: description.into(),
        category,
        props: props
            .into_iter()
            .map(|(name, prop)| (EcoString::from(name), prop))
            .collect(),
        consumes_context,
        provides_context: provides_context.iter().copied().map(EcoString::from).collect(),
    }
}

fn toggle(label: &str, default: bool, description: &str) -> PropSchema {
    PropSchema::new(PropType::Boolean, label, default).describe(description)
}

/// Automaton tuning shared by both fire simulations. Only the grid bounds
/// differ between them.
fn fire_props(max_height: f64, max_width: f64) -> Vec<(&'static str, PropSchema)> {
    vec![
        (
            "gridHeight",
            PropSchema::number("Grid Height", 50, (20.0, max_height, 5.0))
                .describe("Height of the simulation grid"),
        ),
        (
            "gridWidth",
            PropSchema::number("Grid Width", 50, (20.0, max_width, 5.0))
                .describe("Width of the simulation grid"),
        ),
        (
            "scale",
            PropSchema::number("Scale", 10, (5.0, 20.0, 1.0))
                .describe("Pixel size of each grid cell"),
        ),
        (
            "treeChance",
            PropSchema::number("Tree Chance", 0.05, (0.0, 1.0, 0.01))
                .describe("Initial probability of a cell being a tree"),
        ),
        (
            "treeSprout",
            PropSchema::number("Tree Sprout", 1e-9, (0.0, 0.001, 1e-9))
                .describe("Base probability of a tree sprouting on empty ground"),
        ),
        (
            "nearNeighborSprout",
            PropSchema::number("Near Neighbor Sprout", 0.001, (0.0, 0.01, 0.0001))
                .describe("Probability boost per neighboring tree for sprouting"),
        ),
        (
            "treeGrow",
            PropSchema::number("Tree Grow", 0.01, (0.0, 0.1, 0.001))
                .describe("Probability of young tree becoming old tree"),
        ),
        (
            "burnRepair",
            PropSchema::number("Burn Repair", 0.1, (0.0, 1.0, 0.01))
                .describe("Probability of burnt ground recovering"),
        ),
        (
            "houseChance",
            PropSchema::number("House Chance", 0, (0.0, 0.1, 0.001))
                .describe("Initial probability of a cell being a house"),
        ),
        (
            "spontaneousCombustion",
            PropSchema::number("Spontaneous Combustion", 4e-6, (0.0, 0.001, 1e-6))
                .describe("Probability of a tree spontaneously catching fire"),
        ),
        (
            "fireSpreadChance",
            PropSchema::number("Fire Spread", 0.33, (0.0, 1.0, 0.01))
                .describe("Probability of fire spreading to neighboring tree"),
        ),
    ]
}

fn fire_sim() -> ComponentDescriptor {
    let mut props = fire_props(100.0, 100.0);
    props.push((
        "autoPlay",
        toggle("Auto-play", false, "Start simulation automatically"),
    ));
    descriptor(
        "FireSim",
        "Forest Fire Simulation",
        "Interactive cellular automata forest fire simulation - can be controlled by FireSimControl",
        Category::Simulation,
        true,
        &[],
        props,
    )
}

fn fire_sim_control() -> ComponentDescriptor {
    let mut props = fire_props(70.0, 200.0);
    props.push((
        "autoPlay",
        toggle("Auto-play", false, "Start simulation automatically when loaded"),
    ));
    props.push((
        "showControls",
        toggle("Show Controls", true, "Display control sliders"),
    ));
    descriptor(
        "FireSimControl",
        "Fire Simulation with Controls",
        "Forest fire simulation with size and probability controls",
        Category::Simulation,
        true,
        &[
            "gridHeight",
            "gridWidth",
            "scale",
            "treeChance",
            "treeSprout",
            "nearNeighborSprout",
            "treeGrow",
            "burnRepair",
            "houseChance",
            "spontaneousCombustion",
            "fireSpreadChance",
            "play",
            "resetTrigger",
        ],
        props,
    )
}

fn fire_sim_2() -> ComponentDescriptor {
    descriptor(
        "FireSim2",
        "Forest Fire Simulation v2 (Optimized)",
        "Optimized forest fire simulation using new grid automata engine - built-in controls",
        Category::Simulation,
        false,
        &[],
        vec![],
    )
}

fn sphere() -> ComponentDescriptor {
    descriptor(
        "Sphere",
        "3D Sphere Visualization",
        "Interactive 3D sphere with CSS transforms - can be controlled by SphereControl",
        Category::Visualization,
        true,
        &[],
        vec![
            (
                "size",
                PropSchema::number("Size (px)", 300, (100.0, 600.0, 50.0))
                    .describe("Diameter of the sphere in pixels"),
            ),
            (
                "rotationSpeed",
                PropSchema::number("Rotation Speed", 1, (0.0, 5.0, 0.5))
                    .describe("Speed of automatic rotation"),
            ),
            (
                "lineColor",
                PropSchema::new(PropType::Color, "Line Color", "#00a8ff")
                    .describe("Color of the sphere lines"),
            ),
        ],
    )
}

fn sphere_control() -> ComponentDescriptor {
    descriptor(
        "SphereControl",
        "3D Sphere with Controls",
        "Interactive 3D CSS wireframe sphere with customization controls",
        Category::Visualization,
        true,
        &[
            "diameter",
            "longitudeLines",
            "latitudeLines",
            "animationSpeed",
            "colorIndex",
            "animate",
            "rotateX",
            "rotateY",
            "rotateZ",
        ],
        vec![
            (
                "diameter",
                PropSchema::number("Diameter", 290, (50.0, 700.0, 10.0))
                    .describe("Sphere diameter in pixels"),
            ),
            (
                "longitudeLines",
                PropSchema::number("Longitude Lines", 9, (1.0, 50.0, 2.0))
                    .describe("Number of vertical lines"),
            ),
            (
                "latitudeLines",
                PropSchema::number("Latitude Lines", 5, (1.0, 50.0, 1.0))
                    .describe("Number of horizontal lines"),
            ),
            (
                "animationSpeed",
                PropSchema::number("Animation Speed", 30, (1.0, 300.0, 1.0))
                    .describe("Speed of rotation animation"),
            ),
            (
                "colorIndex",
                PropSchema::number("Color", 0, (0.0, 6.0, 1.0))
                    .describe("Sphere line color (0-6)"),
            ),
            ("animate", toggle("Animate", true, "Enable automatic rotation")),
            (
                "showControls",
                toggle("Show Controls", true, "Display control sliders"),
            ),
            (
                "showSphere",
                toggle("Show Sphere", true, "Display the 3D sphere"),
            ),
        ],
    )
}

fn css_artwork() -> ComponentDescriptor {
    descriptor(
        "CSSArtwork",
        "CSS Artwork Gallery",
        "Collection of pure CSS artwork pieces",
        Category::Visualization,
        false,
        &[],
        vec![
            (
                "piece",
                PropSchema::new(PropType::Select, "Artwork Piece", "all")
                    .describe("Which piece to display")
                    .with_options(["all", "geometric", "organic", "octagon", "polygon"]),
            ),
            (
                "animationSpeed",
                PropSchema::number("Animation Speed", 1, (0.0, 3.0, 0.25))
                    .describe("Speed multiplier for animations"),
            ),
            (
                "showTitle",
                toggle(
                    "Show Title",
                    false,
                    "Whether to display the title above each artwork piece",
                ),
            ),
        ],
    )
}
