//! A toy command shell exposing native circles by name.
//!
//! Every registered circle becomes a command; the shell drops the command when the table retires the name.
//! Results of `scale` are returned as temporaries and reclaimed once the request finishes.
//!
//! Run with `RUST_LOG=trace` to see the table's bookkeeping.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, HashMap},
    rc::Rc,
};

use instance_table::{InstanceTable, ObjectAddress, QualifiedType, TypeKey};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug)]
struct Circle {
    radius: f64,
}

/// Stands in for the native allocator owning the circles.
#[derive(Default)]
struct Heap {
    circles: RefCell<HashMap<ObjectAddress, Circle>>,
    next: Cell<usize>,
}

impl Heap {
    fn alloc(&self, circle: Circle) -> ObjectAddress {
        let addr = ObjectAddress::from_usize(0x1000 + self.next.get() * 0x20);
        self.next.set(self.next.get() + 1);
        self.circles.borrow_mut().insert(addr, circle);
        addr
    }

    fn get(&self, addr: ObjectAddress) -> Option<Circle> {
        self.circles.borrow().get(&addr).copied()
    }
}

fn run(
    line: &str,
    table: &InstanceTable,
    heap: &Heap,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let words: Vec<_> = line.split_whitespace().collect();
    let ty = QualifiedType::of::<Circle>();
    match words.as_slice() {
        ["new", name, radius] => {
            let addr = heap.alloc(Circle {
                radius: radius.parse()?,
            });
            table.set_object(*name, addr, ty)?;
            Ok(Some(name.to_string()))
        }
        ["scale", name, factor] => {
            let circle = lookup(table, heap, name)?;
            let addr = heap.alloc(Circle {
                radius: circle.radius * factor.parse::<f64>()?,
            });
            Ok(Some(table.create_temporary(addr, ty)?))
        }
        ["area", name] => {
            let circle = lookup(table, heap, name)?;
            Ok(Some(format!(
                "{:.3}",
                std::f64::consts::PI * circle.radius * circle.radius
            )))
        }
        ["del", name] => {
            table.delete_object(name)?;
            Ok(None)
        }
        _ => Err(format!("unknown command '{line}'").into()),
    }
}

fn lookup(
    table: &InstanceTable,
    heap: &Heap,
    name: &str,
) -> Result<Circle, Box<dyn std::error::Error>> {
    let addr = table.object(name)?;
    heap.get(addr)
        .ok_or_else(|| format!("circle '{name}' at {addr} is no longer on the heap").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let heap = Rc::new(Heap::default());
    let commands = Rc::new(RefCell::new(BTreeSet::new()));

    let table = InstanceTable::new({
        let commands = commands.clone();
        move |name: &str| {
            commands.borrow_mut().remove(name);
        }
    });
    table.set_delete_function(TypeKey::of::<Circle>(), {
        let heap = heap.clone();
        move |addr| {
            heap.circles.borrow_mut().remove(&addr);
        }
    });

    let script = [
        "new c1 1.5",
        "area c1",
        "scale c1 2",
        "new c1 3",
        "area c1",
        "del c1",
        "area c1",
    ];

    for line in script {
        match run(line, &table, &heap) {
            Ok(Some(result)) => {
                if table.exists(&result) {
                    commands.borrow_mut().insert(result.clone());
                    println!("{line:<12} => {result}");
                    // Temporaries only live for the request that produced them.
                    table.delete_if_temporary(&result)?;
                } else {
                    println!("{line:<12} => {result}");
                }
            }
            Ok(None) => println!("{line:<12} => ok"),
            Err(err) => println!("{line:<12} => error: {err}"),
        }
    }

    println!("commands: {:?}", commands.borrow());
    println!("live circles: {}", heap.circles.borrow().len());

    Ok(())
}
