//! Test data: a fixed, ordered list of people.

use razor_cursor::Record;

pub const ITEM_COUNT: usize = 109;

/// Number of people with a name longer than 20 characters
pub const LONG_NAME_COUNT: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Record for Person {
    fn id(&self) -> &str {
        &self.name
    }
}

#[rustfmt::skip]
const NAMES: [&str; ITEM_COUNT] = [
    "Walter White", "Skyler White", "Jesse Pinkman", "Hank Schrader", "Marie Schrader",
    "Walter White, Jr.", "Saul Goodman", "Gustavo Fring", "Mike Ehrmantraut",
    "Lydia Rodarte-Quayle", "Todd Alquist", "Kimberly Wexler", "Howard Hamlin",
    "Ignacio 'Nacho' Varga", "Charles 'Chuck' McGill, Jr.", "Steven Gomez", "Skinny Pete",
    "Carmen Molina", "Tuco Salamanca", "Gretchen Schwartz", "Gonzo", "No-Doze",
    "Domingo 'Krazy-8' Molina", "Emilio Koyama", "Brandon 'Badger' Mayhew",
    "Christian 'Combo' Ortega", "Adam Pinkman", "Wendy", "Bogdan Wolynetz", "Elliott Schwartz",
    "Ken 'Ken Wins'", "Holly White", "Ted Beneke", "George Merkert", "Hector Salamanca",
    "Jane Margolis", "Donald Margolis", "Clovis", "SAC Ramey", "Victor", "Tomás Cantillo",
    "Francesca Liddy", "Cythia", "Tortuga", "Det. Tim Roberts", "Andrea Cantillo",
    "Brock Cantillo", "Gale Boetticher", "Leonel Salamanca", "Juan Bolsa", "Group Leader",
    "Kaylee Ehrmantraut", "Marco Salamanca", "Pamela", "Duane Chow", "Stacey Ehrmantraut",
    "Officer Saxton", "Huell Babineaux", "Patrick Kuby", "Chris Mara", "Tyrus Kitt",
    "Don Eladio Vuente", "Gaff", "Dennis Markowski", "Lawson", "Barry Goodman",
    "Detective Kalanchoe", "Detective Munn", "Nurse", "Stephanie Doswell", "Declan",
    "Ron Forenall", "Dan Wachsberger", "Jack Welker", "Kenny", "Frankie", "Fran", "Lester", "Matt",
    "Ernesto", "Mrs. Nguyen", "Rick Schweikart", "Dr. Caldera", "Bill Oakley", "Irene Landry",
    "Marco Pasternak", "Betsy Kettleman", "Craig Kettleman", "Detective Sanders",
    "Detective Abbasi", "Joey Dixon", "Sound Guy", "Daniel 'Pryce' Wormald", "Mrs. Strauss",
    "Brenda", "Dr. Laura Cruz", "Paige Novick", "Arturo", "Kevin Wachtell", "Erin Brill",
    "Ximenez Lecerda", "Clifford Main", "Omar", "Brian Archuleta", "Rebecca McGill née Bois",
    "Make-up Artist", "Captain Bauer", "Mr. Ughetta", "David Brightbill",
];

pub fn people() -> Vec<Person> {
    NAMES.iter().map(|name| Person::new(name)).collect()
}

/// Counted in chars, "née" is 3 characters
pub fn has_long_name(p: &Person) -> bool {
    p.id().chars().count() > 20
}
