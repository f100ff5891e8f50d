use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

static FIRST_NAMES: &[&str] = &[
	"Ada", "Alan", "Barbara", "Brian", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Guido",
	"Hedy", "Ivan", "John", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Sophie", "Tim",
];

static LAST_NAMES: &[&str] = &[
	"Allen", "Backus", "Cerf", "Dijkstra", "Engelbart", "Hamilton", "Hopper", "Kay", "Knuth",
	"Lamport", "Liskov", "Lovelace", "McCarthy", "Perlman", "Ritchie", "Shannon", "Thompson",
	"Torvalds", "Turing", "Wirth",
];

static WORDS: &[&str] = &[
	"avocado", "branch", "cache", "delta", "engine", "filter", "garden", "harbor", "island",
	"journal", "kernel", "ledger", "module", "needle", "orbit", "packet", "quartz", "river",
	"signal", "token", "update", "vector", "window", "yield", "zenith",
];

static DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Generator of fake data for tests
pub struct Faker {
	rng: StdRng,
}

impl Default for Faker {
	fn default() -> Self {
		Self::new()
	}
}

impl Faker {
	/// Create a faker seeded from the operating system
	pub fn new() -> Self {
		Self {
			rng: StdRng::from_entropy(),
		}
	}

	/// Create a faker that always produces the same sequence for the same seed
	pub fn seeded(seed: u64) -> Self {
		Self {
			rng: StdRng::seed_from_u64(seed),
		}
	}

	/// A random number in `0..bound`. Always 0 when the bound is 0
	pub fn random_number(&mut self, bound: u32) -> u32 {
		if bound == 0 {
			0
		} else {
			self.rng.gen_range(0..bound)
		}
	}

	/// A random number in `1..=max`, for sizing generated collections
	pub fn count(&mut self, max: usize) -> usize {
		self.rng.gen_range(1..=max.max(1))
	}

	/// A first name
	pub fn first_name(&mut self) -> String {
		self.pick(FIRST_NAMES)
	}

	/// A last name
	pub fn last_name(&mut self) -> String {
		self.pick(LAST_NAMES)
	}

	/// A first and last name separated by a space
	pub fn full_name(&mut self) -> String {
		format!("{} {}", self.first_name(), self.last_name())
	}

	/// A lowercase word
	pub fn word(&mut self) -> String {
		self.pick(WORDS)
	}

	/// A capitalized sentence of the given number of words, ending with a period
	pub fn sentence(&mut self, words: usize) -> String {
		let words: Vec<String> = (0..words.max(1)).map(|_| self.word()).collect();
		let mut out = words.join(" ");
		if let Some(first) = out.get_mut(0..1) {
			first.make_ascii_uppercase();
		}
		out.push('.');
		out
	}

	/// An email address made from a fake name
	pub fn email(&mut self) -> String {
		let first = self.first_name().to_lowercase();
		let last = self.last_name().to_lowercase();
		let number = self.random_number(100);
		let domain = self.pick(DOMAINS);
		format!("{first}.{last}{number}@{domain}")
	}

	fn pick(&mut self, list: &[&str]) -> String {
		list.choose(&mut self.rng)
			.map(|x| x.to_string())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_seeded_is_reproducible() {
		let mut a = Faker::seeded(42);
		let mut b = Faker::seeded(42);
		for _ in 0..10 {
			assert_eq!(a.full_name(), b.full_name());
			assert_eq!(a.random_number(1000), b.random_number(1000));
		}
	}

	#[test]
	fn test_bounds() {
		let mut faker = Faker::new();
		assert_eq!(faker.random_number(0), 0);
		for _ in 0..100 {
			assert!(faker.random_number(10) < 10);
			let count = faker.count(99);
			assert!((1..=99).contains(&count));
		}
		assert_eq!(faker.count(0), 1);
	}

	#[test]
	fn test_text_shapes() {
		let mut faker = Faker::seeded(7);
		let sentence = faker.sentence(4);
		assert!(sentence.ends_with('.'));
		assert_eq!(sentence.split(' ').count(), 4);
		assert!(sentence.chars().next().unwrap().is_ascii_uppercase());

		let email = faker.email();
		assert_eq!(email.matches('@').count(), 1);
		assert!(FIRST_NAMES.contains(&faker.first_name().as_str()));
	}
}
